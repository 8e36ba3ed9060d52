use std::fmt::Display;

use chrono::{DateTime, Utc};
use salesmap_engine::db_types::{InvoiceAddress, NewOrder, OrderId};
use serde::{Deserialize, Serialize};

/// Wire form of the order-paid webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingOrder {
    pub order_id: OrderId,
    pub code: String,
    pub event: String,
    #[serde(default)]
    pub invoice_address: Option<InvoiceAddress>,
    pub paid_at: DateTime<Utc>,
}

impl From<IncomingOrder> for NewOrder {
    fn from(value: IncomingOrder) -> Self {
        NewOrder {
            order_id: value.order_id,
            code: value.code,
            event: value.event,
            address: value.invoice_address.unwrap_or_default(),
            paid_at: value.paid_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
