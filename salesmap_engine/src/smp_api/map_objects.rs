use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One resolved point on the sales map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MapLocation {
    pub lat: f64,
    pub lon: f64,
    /// Label shown when hovering the marker, e.g. `Order: ABC12`.
    pub tooltip: String,
}

/// Payload of the map data endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub locations: Vec<MapLocation>,
}

impl MapData {
    pub fn new(locations: Vec<MapLocation>) -> Self {
        Self { locations }
    }
}
