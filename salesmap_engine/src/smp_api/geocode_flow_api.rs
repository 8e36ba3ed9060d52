use std::fmt::Debug;

use log::*;
use smp_common::Coordinates;
use thiserror::Error;

use crate::{
    db_types::OrderId,
    helpers::format_address,
    traits::{GeocodeGateway, GeocodeGatewayError, SalesMapDatabase, SalesMapDatabaseError},
};

#[derive(Debug, Clone, Error)]
pub enum GeocodeFlowError {
    #[error("Order {0} is not in the database")]
    OrderNotFound(OrderId),
    #[error(transparent)]
    DatabaseError(#[from] SalesMapDatabaseError),
}

/// What became of a single geocoding attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeOutcome {
    /// The address resolved and the coordinates were stored.
    Resolved(Coordinates),
    /// A lookup was attempted but did not resolve; a null-coordinate record was stored so the
    /// failure is visible in the data.
    Unresolved,
    /// The order has no invoice address. Nothing was stored.
    NoAddress,
}

/// `GeocodeFlowApi` is the background geocoding task: load the order, format its address, ask the
/// gateway, record the outcome.
pub struct GeocodeFlowApi<B> {
    db: B,
}

impl<B> Debug for GeocodeFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GeocodeFlowApi")
    }
}

impl<B> GeocodeFlowApi<B>
where B: SalesMapDatabase
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Geocode one order end to end.
    ///
    /// Gateway failures never propagate: every failed lookup is reduced to an `Unresolved`
    /// outcome with a null-coordinate upsert. There are no retries here; re-delivery of the
    /// payment notification is the retry mechanism.
    pub async fn geocode_order<G: GeocodeGateway>(
        &self,
        order_id: &OrderId,
        geocoder: &G,
    ) -> Result<GeocodeOutcome, GeocodeFlowError> {
        let order = self
            .db
            .fetch_order_by_order_id(order_id)
            .await?
            .ok_or_else(|| GeocodeFlowError::OrderNotFound(order_id.clone()))?;
        let Some(query) = format_address(&order.address) else {
            info!("📍️ Order {} has no invoice address to geocode.", order.code);
            return Ok(GeocodeOutcome::NoAddress);
        };
        let outcome = match geocoder.geocode(&query).await {
            Ok(coordinates) => {
                self.db.upsert_geocode(order_id, Some(coordinates)).await?;
                info!("📍️ Successfully geocoded order {}: {coordinates}", order.code);
                GeocodeOutcome::Resolved(coordinates)
            },
            Err(GeocodeGatewayError::NotFound) => {
                warn!("📍️ Could not geocode address for order {}: no match for '{query}'", order.code);
                self.db.upsert_geocode(order_id, None).await?;
                GeocodeOutcome::Unresolved
            },
            Err(e @ (GeocodeGatewayError::Timeout |
            GeocodeGatewayError::ServiceError(_) |
            GeocodeGatewayError::UnexpectedError(_))) => {
                error!("📍️ Geocoding failed for order {} with address '{query}'. {e}", order.code);
                self.db.upsert_geocode(order_id, None).await?;
                GeocodeOutcome::Unresolved
            },
        };
        Ok(outcome)
    }
}
