use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, Order},
    events::{EventProducers, OrderPaidEvent},
    traits::{SalesMapDatabase, SalesMapDatabaseError},
};

/// `OrderFlowApi` is the entry point for paid-order notifications coming in from the ticketing
/// platform. It mirrors the order locally and notifies every subscriber that a paid order has
/// arrived; the subscribers (the geocoding hook, in practice) take it from there.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderFlowApi<B>
where B: SalesMapDatabase
{
    /// Record a paid order and schedule geocoding for it.
    ///
    /// The upsert is idempotent, and the event is published on every call, so a re-delivered
    /// notification simply re-runs the geocoding pipeline. Publishing failures are logged inside
    /// the producer and never surface here; payment processing on the host side must not be
    /// affected by anything this service does.
    pub async fn process_paid_order(&self, order: NewOrder) -> Result<(Order, bool), SalesMapDatabaseError> {
        let (order, inserted) = self.db.upsert_order(order).await?;
        self.call_order_paid_hook(&order).await;
        debug!(
            "🔄️📦️ Order [{}] processing complete. Geocoding for event '{}' has been scheduled.",
            order.order_id, order.event
        );
        Ok((order, inserted))
    }

    async fn call_order_paid_hook(&self, order: &Order) {
        for emitter in &self.producers.order_paid_producer {
            debug!("🔄️📦️ Notifying order paid hook subscribers");
            let event = OrderPaidEvent::new(order.order_id.clone());
            emitter.publish_event(event).await;
        }
    }
}
