use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smp_common::Coordinates;
use sqlx::{sqlite::SqliteRow, FromRow, Row, Type};
use thiserror::Error;

//--------------------------------------        OrderId       ---------------------------------------------------------
/// The ticketing platform's unique identifier for an order. Treated as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for OrderId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

//--------------------------------------     InvoiceAddress    --------------------------------------------------------
/// The billing address attached to an order. Every field is optional; the host platform lets
/// customers leave any of them blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InvoiceAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl InvoiceAddress {
    pub fn is_empty(&self) -> bool {
        [&self.street, &self.city, &self.zipcode, &self.state, &self.country]
            .iter()
            .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

//--------------------------------------        NewOrder       --------------------------------------------------------
/// A paid order as received from the ticketing platform, before it has a local row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_id: OrderId,
    /// Human-readable order code, used for map labels.
    pub code: String,
    /// Slug of the event the order belongs to.
    pub event: String,
    #[serde(default)]
    pub address: InvoiceAddress,
    pub paid_at: DateTime<Utc>,
}

//--------------------------------------         Order         --------------------------------------------------------
/// A locally mirrored order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    pub code: String,
    pub event: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub address: InvoiceAddress,
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------     GeocodeRecord     --------------------------------------------------------
/// The stored outcome of geocoding one order. `coordinates` is `None` when the last attempt did
/// not resolve; a record only exists at all once a geocode attempt has been made for the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeRecord {
    pub id: i64,
    pub order_id: OrderId,
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Latitude and longitude live in two nullable columns, but they leave the database as a single
// `Option<Coordinates>` so a half-pair is unrepresentable. The schema carries a CHECK constraint
// guaranteeing `from_parts` never sees one.
impl FromRow<'_, SqliteRow> for GeocodeRecord {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let latitude: Option<f64> = row.try_get("latitude")?;
        let longitude: Option<f64> = row.try_get("longitude")?;
        Ok(Self {
            id: row.try_get("id")?,
            order_id: OrderId(row.try_get("order_id")?),
            coordinates: Coordinates::from_parts(latitude, longitude),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

//--------------------------------------          Role         --------------------------------------------------------
#[derive(Debug, Clone, Error)]
#[error("Invalid role: {0}")]
pub struct InvalidRole(String);

/// Access roles granted by the ticketing platform to control-panel callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May view order data for an event, including the sales map.
    ViewOrders,
    /// Full administrative access.
    Admin,
}

pub type Roles = Vec<Role>;

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::ViewOrders => write!(f, "view_orders"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_orders" => Ok(Role::ViewOrders),
            "admin" => Ok(Role::Admin),
            _ => Err(InvalidRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_invoice_address() {
        assert!(InvoiceAddress::default().is_empty());
        let whitespace_only = InvoiceAddress { city: Some("   ".to_string()), ..InvoiceAddress::default() };
        assert!(whitespace_only.is_empty());
        let with_city = InvoiceAddress { city: Some("Springfield".to_string()), ..InvoiceAddress::default() };
        assert!(!with_city.is_empty());
    }

    #[test]
    fn role_round_trip() {
        for role in [Role::ViewOrders, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn new_order_deserializes_without_address() {
        let json = r#"{"order_id": "12345", "code": "ABC12", "event": "democon", "paid_at": "2024-05-01T12:00:00Z"}"#;
        let order: NewOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id.as_str(), "12345");
        assert!(order.address.is_empty());
    }
}
