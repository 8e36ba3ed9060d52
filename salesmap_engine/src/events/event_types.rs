use serde::{Deserialize, Serialize};

use crate::db_types::OrderId;

/// Published whenever the order flow records a paid order. Carries only the order identifier;
/// handlers load whatever state they need, so a slow consumer never holds a stale order snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPaidEvent {
    pub order_id: OrderId,
}

impl OrderPaidEvent {
    pub fn new(order_id: OrderId) -> Self {
        Self { order_id }
    }
}
