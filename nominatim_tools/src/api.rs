use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use smp_common::Coordinates;
use tokio::{
    sync::Mutex,
    time::{sleep, Instant},
};

use crate::{config::NominatimConfig, data_objects::Place, error::NominatimApiError};

/// Client for the Nominatim search API.
///
/// Cloning is cheap and clones share the same rate limiter, so a server can hand one instance to
/// any number of concurrent tasks and still respect the one-request-per-interval policy.
#[derive(Clone)]
pub struct NominatimApi {
    config: NominatimConfig,
    client: Arc<Client>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimApi {
    pub fn new(config: NominatimConfig) -> Result<Self, NominatimApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        let ua = HeaderValue::from_str(&config.full_user_agent())
            .map_err(|e| NominatimApiError::Initialization(e.to_string()))?;
        headers.insert("User-Agent", ua);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| NominatimApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client), last_request: Arc::new(Mutex::new(None)) })
    }

    /// Resolve a free-form address string to coordinates.
    ///
    /// Blocks (asynchronously) until the rate limiter grants a slot, then issues a single
    /// `/search` request with `limit=1`. No retries are performed; every failure mode maps onto
    /// one [`NominatimApiError`] variant and the caller decides what a failure means.
    pub async fn geocode(&self, query: &str) -> Result<Coordinates, NominatimApiError> {
        self.wait_for_slot().await;
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        trace!("📍️ Sending geocode query: {url}?q={query}");
        let response = self
            .client
            .get(url)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NominatimApiError::Timeout
                } else {
                    NominatimApiError::UnexpectedError(e.to_string())
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NominatimApiError::ServiceError(format!("Status {status}. {message}")));
        }
        let places = response.json::<Vec<Place>>().await.map_err(|e| {
            if e.is_timeout() {
                NominatimApiError::Timeout
            } else {
                NominatimApiError::UnexpectedError(format!("Could not deserialize response. {e}"))
            }
        })?;
        let place = places.first().ok_or(NominatimApiError::NotFound)?;
        let coordinates = place.coordinates()?;
        debug!("📍️ Geocoded '{query}' to {coordinates} (place id {})", place.place_id);
        Ok(coordinates)
    }

    /// Serializes callers and spaces request dispatches by at least `min_request_interval`.
    /// The lock is held across the sleep so that a burst of tasks drains one per interval.
    async fn wait_for_slot(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.config.min_request_interval {
                let wait = self.config.min_request_interval - elapsed;
                trace!("📍️ Rate limiter: waiting {}ms before next geocode request", wait.as_millis());
                sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}
