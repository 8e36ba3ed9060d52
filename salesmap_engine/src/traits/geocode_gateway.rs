use std::future::Future;

use smp_common::Coordinates;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GeocodeGatewayError {
    #[error("The geocoding request timed out")]
    Timeout,
    #[error("The geocoding service returned an error: {0}")]
    ServiceError(String),
    #[error("The geocoding service has no match for the address")]
    NotFound,
    #[error("Unexpected geocoding failure: {0}")]
    UnexpectedError(String),
}

/// An external address-lookup service.
///
/// The returned future carries an explicit `Send` bound because gateway calls run inside spawned
/// event-handler tasks.
pub trait GeocodeGateway: Clone + Send + Sync {
    fn geocode(&self, query: &str) -> impl Future<Output = Result<Coordinates, GeocodeGatewayError>> + Send;
}
