//! Sales Map Engine
//!
//! The engine holds everything about the sales map service that is not HTTP: the local mirror of
//! paid orders and their geocode records, the SQLite backend, the address formatter, and the
//! pub-sub event channel that decouples "an order was paid" from "geocode that order".
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@traits`] and the [`SqliteDatabase`] backend). You
//!    should never need to touch SQL from outside this crate; the public API surface is the trait
//!    set plus the typed records in [`mod@db_types`].
//! 2. The engine public API ([`OrderFlowApi`], [`GeocodeFlowApi`], [`MapApi`]). These wrap a
//!    backend and implement the order-paid flow, the background geocoding task and the map data
//!    queries respectively.
//! 3. The event system ([`mod@events`]). The server registers a geocoding hook at startup and the
//!    order flow publishes an [`events::OrderPaidEvent`] for every paid order that arrives, so
//!    geocoding runs on worker tasks without ever blocking a webhook response.
pub mod db_types;
pub mod events;
pub mod helpers;
mod smp_api;
mod sqlite;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use smp_api::{
    map_objects::{MapData, MapLocation},
    GeocodeFlowApi,
    GeocodeFlowError,
    GeocodeOutcome,
    MapApi,
    OrderFlowApi,
};
pub use sqlite::SqliteDatabase;
