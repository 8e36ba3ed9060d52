use std::fmt::Debug;

use log::trace;

use crate::{
    smp_api::map_objects::MapData,
    traits::{MapQuery, MapQueryError},
};

/// Read-side API for the map endpoints.
pub struct MapApi<B> {
    db: B,
}

impl<B> Debug for MapApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MapApi")
    }
}

impl<B> MapApi<B>
where B: MapQuery
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn locations_for_event(&self, event: &str) -> Result<MapData, MapQueryError> {
        let locations = self.db.fetch_locations_for_event(event).await?;
        trace!("🗺️ Fetched {} locations for event '{event}'", locations.len());
        Ok(MapData::new(locations))
    }
}
