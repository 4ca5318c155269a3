//! API configuration, loaded from environment variables with development
//! defaults.

use emlak_geo::ResolverConfig;
use std::time::Duration;

/// API configuration for binding, CORS, and resolver TTLs.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host (`EMLAK_API_BIND`, default `0.0.0.0`).
    pub bind: String,

    /// Bind port (`PORT` or `EMLAK_API_PORT`, default 3000).
    pub port: u16,

    /// Allowed CORS origins (`EMLAK_CORS_ORIGINS`, comma-separated).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// TTL for the reference cache regions
    /// (`EMLAK_GEO_REFERENCE_TTL_SECS`, default 86400).
    pub reference_ttl: Duration,

    /// TTL for the street cache region
    /// (`EMLAK_GEO_STREET_TTL_SECS`, default 1800).
    pub street_ttl: Duration,

    /// Per-call HTTP provider timeout
    /// (`EMLAK_GEO_PROVIDER_TIMEOUT_SECS`, default 10).
    pub provider_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let resolver = ResolverConfig::default();
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            reference_ttl: resolver.reference_ttl,
            street_ttl: resolver.street_ttl,
            provider_timeout: resolver.provider_timeout,
        }
    }
}

fn env_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind = std::env::var("EMLAK_API_BIND").unwrap_or(defaults.bind);

        let port = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("EMLAK_API_PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origins = std::env::var("EMLAK_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind,
            port,
            cors_origins,
            reference_ttl: env_secs("EMLAK_GEO_REFERENCE_TTL_SECS", defaults.reference_ttl),
            street_ttl: env_secs("EMLAK_GEO_STREET_TTL_SECS", defaults.street_ttl),
            provider_timeout: env_secs("EMLAK_GEO_PROVIDER_TIMEOUT_SECS", defaults.provider_timeout),
        }
    }

    /// The resolver configuration slice of this config.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            reference_ttl: self.reference_ttl,
            street_ttl: self.street_ttl,
            provider_timeout: self.provider_timeout,
        }
    }
}
