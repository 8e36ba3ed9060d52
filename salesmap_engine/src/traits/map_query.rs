use thiserror::Error;

use crate::smp_api::map_objects::MapLocation;

#[derive(Debug, Clone, Error)]
pub enum MapQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for MapQueryError {
    fn from(e: sqlx::Error) -> Self {
        MapQueryError::DatabaseError(e.to_string())
    }
}

/// The read path for the map endpoints.
#[allow(async_fn_in_trait)]
pub trait MapQuery {
    /// All resolved locations for the given event, ordered by order code. Records without
    /// coordinates (failed or unresolved geocode attempts) are excluded here, not by the caller.
    async fn fetch_locations_for_event(&self, event: &str) -> Result<Vec<MapLocation>, MapQueryError>;
}
