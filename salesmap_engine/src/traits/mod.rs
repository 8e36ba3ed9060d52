//! Interface contracts of the sales map engine.
//!
//! ## Traits
//! * [`SalesMapDatabase`] defines the write path used by the order-paid flow and the background
//!   geocoding task: mirroring orders and upserting geocode records.
//! * [`MapQuery`] provides the read path for the map endpoints.
//! * [`GeocodeGateway`] abstracts the external address-lookup service so that the geocoding task
//!   can be driven against a stub in tests.
//!
//! [`crate::SqliteDatabase`] implements the two storage traits; the server crate provides the
//! Nominatim-backed gateway.
mod geocode_gateway;
mod map_query;
mod sales_map_database;

pub use geocode_gateway::{GeocodeGateway, GeocodeGatewayError};
pub use map_query::{MapQuery, MapQueryError};
pub use sales_map_database::{SalesMapDatabase, SalesMapDatabaseError};
