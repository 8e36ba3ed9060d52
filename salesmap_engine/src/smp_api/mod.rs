//! The engine public API.
//!
//! [`OrderFlowApi`] handles incoming paid orders, [`GeocodeFlowApi`] is the background geocoding
//! task, and [`MapApi`] serves the map read path. Each wraps a backend implementing the
//! corresponding trait from [`crate::traits`].
mod geocode_flow_api;
mod map_api;
pub mod map_objects;
mod order_flow_api;

pub use geocode_flow_api::{GeocodeFlowApi, GeocodeFlowError, GeocodeOutcome};
pub use map_api::MapApi;
pub use order_flow_api::OrderFlowApi;
