use std::time::Duration;

use log::*;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "SalesMapServer/0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Client identifier sent as the `User-Agent`. The Nominatim usage policy requires this to
    /// identify the application, not the HTTP library.
    pub user_agent: String,
    /// Contact address appended to the user agent so the service operators can reach us.
    pub contact: String,
    pub timeout: Duration,
    /// Minimum spacing between two consecutive requests from this client.
    pub min_request_interval: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            contact: String::default(),
            timeout: DEFAULT_TIMEOUT,
            min_request_interval: DEFAULT_MIN_REQUEST_INTERVAL,
        }
    }
}

impl NominatimConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("SMP_NOMINATIM_URL").unwrap_or_else(|_| {
            info!("🪛️ SMP_NOMINATIM_URL not set, using {DEFAULT_NOMINATIM_URL}");
            DEFAULT_NOMINATIM_URL.to_string()
        });
        let user_agent = std::env::var("SMP_NOMINATIM_USER_AGENT").unwrap_or_else(|_| {
            warn!(
                "🪛️ SMP_NOMINATIM_USER_AGENT not set. Using the default, {DEFAULT_USER_AGENT}. Public Nominatim \
                 instances require a distinct client identifier, so set this before going live."
            );
            DEFAULT_USER_AGENT.to_string()
        });
        let contact = std::env::var("SMP_NOMINATIM_CONTACT").unwrap_or_else(|_| {
            warn!("🪛️ SMP_NOMINATIM_CONTACT not set. The geocoding service has no way to contact us about abuse.");
            String::default()
        });
        let timeout = std::env::var("SMP_NOMINATIM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid value for SMP_NOMINATIM_TIMEOUT_SECS. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let min_request_interval = std::env::var("SMP_NOMINATIM_MIN_INTERVAL_MS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid value for SMP_NOMINATIM_MIN_INTERVAL_MS. {e}"))
                    .ok()
            })
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_MIN_REQUEST_INTERVAL);
        Self { base_url, user_agent, contact, timeout, min_request_interval }
    }

    /// The full `User-Agent` value: the client identifier, plus the contact address when present.
    pub fn full_user_agent(&self) -> String {
        if self.contact.is_empty() {
            self.user_agent.clone()
        } else {
            format!("{} ({})", self.user_agent, self.contact)
        }
    }
}
