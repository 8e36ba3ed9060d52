//! A small typed client for the Nominatim search API.
//!
//! Nominatim's usage policy caps clients at one request per second and requires a distinct
//! `User-Agent` with contact details. [`NominatimApi`] enforces both: every instance carries its
//! own rate limiter that serializes geocode calls and spaces them by the configured minimum
//! interval, and the client identifier is baked into the request headers at construction time.
mod api;
mod config;
mod error;

mod data_objects;

pub use api::NominatimApi;
pub use config::NominatimConfig;
pub use data_objects::Place;
pub use error::NominatimApiError;
