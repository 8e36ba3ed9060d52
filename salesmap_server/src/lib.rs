//! # Sales Map server
//! This module hosts the HTTP surface of the sales map service. It is responsible for:
//! Listening for incoming order-paid webhook calls from the ticketing platform.
//! Parsing the request body and mirroring the order locally.
//! Publishing the paid order to the geocoding hook, which resolves the invoice address in the
//! background and records the result.
//! Serving the aggregated coordinates back to the platform's control panel, as JSON and as an
//! embedded map page.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/incoming/order_paid`: The webhook route for receiving order-paid events.
//! * `/api/events/{event}/sales-map/data`: Coordinate data for an event's paid orders.
//! * `/api/events/{event}/sales-map`: The map page itself.

pub mod auth;
pub mod cli;
pub mod config;
pub mod csp;
pub mod errors;

pub mod data_objects;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

pub mod webhook_routes;

#[cfg(test)]
mod endpoint_tests;
