use thiserror::Error;

#[derive(Debug, Error)]
pub enum NominatimApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("The geocoding request timed out")]
    Timeout,
    #[error("The geocoding service returned an error: {0}")]
    ServiceError(String),
    #[error("The geocoding service has no match for the address")]
    NotFound,
    #[error("Unexpected geocoding failure: {0}")]
    UnexpectedError(String),
}
