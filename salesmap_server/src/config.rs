use std::env;

use log::*;
use nominatim_tools::NominatimConfig;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use smp_common::Secret;

use crate::errors::ServerError;

const DEFAULT_SMP_HOST: &str = "127.0.0.1";
const DEFAULT_SMP_PORT: u16 = 8460;
pub const DEFAULT_MAP_TILE_DOMAIN: &str = "https://*.tile.openstreetmap.org";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// Validation settings for the order-paid webhook.
    pub webhook: WebhookConfig,
    /// Settings for the upstream geocoding service.
    pub nominatim: NominatimConfig,
    /// Tile server origin merged into the map page's Content-Security-Policy `img-src`.
    pub map_tile_domain: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMP_HOST.to_string(),
            port: DEFAULT_SMP_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
            webhook: WebhookConfig::default(),
            nominatim: NominatimConfig::default(),
            map_tile_domain: DEFAULT_MAP_TILE_DOMAIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SMP_HOST").ok().unwrap_or_else(|| DEFAULT_SMP_HOST.into());
        let port = env::var("SMP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SMP_PORT. {e} Using the default, {DEFAULT_SMP_PORT}, instead."
                    );
                    DEFAULT_SMP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SMP_PORT);
        let database_url = env::var("SMP_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ SMP_DATABASE_URL is not set. Please set it to the URL for the sales map database.");
            String::default()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!("🪛️ Could not load the authentication configuration from environment variables. {e}");
            AuthConfig::default()
        });
        let webhook = WebhookConfig::from_env_or_default();
        let nominatim = NominatimConfig::new_from_env_or_default();
        let map_tile_domain = env::var("SMP_MAP_TILE_DOMAIN").ok().unwrap_or_else(|| {
            info!("🪛️ SMP_MAP_TILE_DOMAIN not set, using {DEFAULT_MAP_TILE_DOMAIN}");
            DEFAULT_MAP_TILE_DOMAIN.to_string()
        });
        Self { host, port, database_url, auth, webhook, nominatim, map_tile_domain }
    }
}

//-------------------------------------------------  WebhookConfig  ----------------------------------------------------
#[derive(Clone, Debug)]
pub struct WebhookConfig {
    /// Shared secret used to verify the HMAC signature on incoming webhook calls.
    pub hmac_secret: Secret<String>,
    /// If false, the HMAC signature on webhook calls is not checked. Development only.
    pub hmac_checks: bool,
}

// Checks are on by default; disabling them requires an explicit opt-out via
// SMP_WEBHOOK_HMAC_CHECKS.
impl Default for WebhookConfig {
    fn default() -> Self {
        Self { hmac_secret: Secret::default(), hmac_checks: true }
    }
}

impl WebhookConfig {
    pub fn from_env_or_default() -> Self {
        let hmac_secret = env::var("SMP_WEBHOOK_HMAC_SECRET").ok().unwrap_or_else(|| {
            error!(
                "🪛️ SMP_WEBHOOK_HMAC_SECRET is not set. Please set it to the shared secret the ticketing platform \
                 signs webhook calls with."
            );
            String::default()
        });
        let hmac_checks = env::var("SMP_WEBHOOK_HMAC_CHECKS").map(|s| &s != "0" && &s != "false").unwrap_or(true);
        if !hmac_checks {
            warn!(
                "🚨️ Webhook HMAC checks are disabled. Anyone who can reach this server can inject orders. Do not run \
                 production like this."
            );
        }
        Self { hmac_secret: Secret::new(hmac_secret), hmac_checks }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The shared secret used to verify access tokens (HS256). The ticketing platform issues
    /// control-panel tokens signed with the same secret.
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT secret has not been set. I'm using a random value for this session. Tokens issued by the \
             ticketing platform will NOT validate. Set SMP_JWT_SECRET for production use. 🚨️🚨️🚨️"
        );
        let secret: String = thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect();
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret = env::var("SMP_JWT_SECRET")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [SMP_JWT_SECRET]")))?;
        if secret.len() < 32 {
            warn!("🪛️ SMP_JWT_SECRET is shorter than 32 characters. Consider using a longer secret.");
        }
        Ok(Self { jwt_secret: Secret::new(secret) })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sensible_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, DEFAULT_SMP_HOST);
        assert_eq!(config.port, DEFAULT_SMP_PORT);
        assert_eq!(config.map_tile_domain, DEFAULT_MAP_TILE_DOMAIN);
        // Signature checks must never be off unless explicitly disabled.
        assert!(config.webhook.hmac_checks);
    }
}
