use smp_common::Coordinates;
use thiserror::Error;

use crate::db_types::{GeocodeRecord, NewOrder, Order, OrderId};

#[derive(Debug, Clone, Error)]
pub enum SalesMapDatabaseError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for SalesMapDatabaseError {
    fn from(e: sqlx::Error) -> Self {
        SalesMapDatabaseError::DatabaseError(e.to_string())
    }
}

/// The write path of a sales map backend: the order mirror and the geocode store.
///
/// Every write is an idempotent upsert keyed by the host platform's order id, so a re-delivered
/// payment notification or a re-run geocode task overwrites rather than duplicates.
#[allow(async_fn_in_trait)]
pub trait SalesMapDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Insert or overwrite the mirror row for this order. Returns the stored row and `true` if a
    /// new row was created, `false` if an existing one was overwritten.
    async fn upsert_order(&self, order: NewOrder) -> Result<(Order, bool), SalesMapDatabaseError>;

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, SalesMapDatabaseError>;

    /// Record the outcome of a geocode attempt for the order. `None` records an attempt that did
    /// not resolve. Last write wins.
    async fn upsert_geocode(
        &self,
        order_id: &OrderId,
        coordinates: Option<Coordinates>,
    ) -> Result<GeocodeRecord, SalesMapDatabaseError>;

    async fn fetch_geocode_by_order_id(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<GeocodeRecord>, SalesMapDatabaseError>;
}
