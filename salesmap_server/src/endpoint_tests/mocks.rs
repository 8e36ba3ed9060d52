use mockall::mock;
use salesmap_engine::{
    traits::{MapQuery, MapQueryError},
    MapLocation,
};

mock! {
    pub MapReader {}
    impl MapQuery for MapReader {
        async fn fetch_locations_for_event(&self, event: &str) -> Result<Vec<MapLocation>, MapQueryError>;
    }
}
