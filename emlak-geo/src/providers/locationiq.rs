//! LocationIQ forward-geocoding adapter (HTTP provider B).

use async_trait::async_trait;
use emlak_core::key::normalize;
use emlak_core::{AddressComponent, EmlakResult, GeoKey, ProviderError};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::{address_field_candidates, GeoProvider};
use crate::normalize::{clean_label, dedupe};

const PROVIDER: &str = "locationiq";
const DEFAULT_BASE_URL: &str = "https://api.locationiq.com/v1/search";

/// Environment variable holding the LocationIQ API key.
pub const API_KEY_ENV: &str = "LOCATIONIQ_API_KEY";

#[derive(Debug, Deserialize)]
struct Place {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    address: HashMap<String, String>,
}

/// LocationIQ adapter. Like the OpenCage adapter, a missing API key makes
/// it permanently unavailable rather than crashing the process.
pub struct LocationIqProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl LocationIqProvider {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        if api_key.is_none() {
            tracing::warn!(provider = PROVIDER, "no API key configured, adapter disabled");
        }
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the API key from `LOCATIONIQ_API_KEY`.
    pub fn from_env(timeout: Duration) -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok(), timeout)
    }

    fn map_places(key: &GeoKey, places: Vec<Place>) -> Vec<AddressComponent> {
        let candidates = address_field_candidates(key.target());
        let components = places
            .into_iter()
            .filter_map(|place| {
                let raw = candidates
                    .iter()
                    .find_map(|field| place.address.get(*field).cloned())
                    .or_else(|| {
                        place
                            .display_name
                            .split(',')
                            .next()
                            .map(|segment| segment.trim().to_string())
                    })?;
                let label = clean_label(&raw);
                if label.is_empty() {
                    return None;
                }
                let mut component = AddressComponent::new(key.target(), normalize(&label), label);
                if let (Ok(lat), Ok(lon)) = (place.lat.parse::<f64>(), place.lon.parse::<f64>()) {
                    component = component.with_location(lat, lon);
                }
                Some(component)
            })
            .collect();
        dedupe(components)
    }
}

#[async_trait]
impl GeoProvider for LocationIqProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn query(&self, key: &GeoKey) -> EmlakResult<Vec<AddressComponent>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingCredentials {
                provider: PROVIDER.to_string(),
            }
            .into());
        };

        let query_text = key.query_text();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", api_key),
                ("q", query_text.as_str()),
                ("countrycodes", key.country()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "25"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        provider: PROVIDER.to_string(),
                    }
                } else {
                    ProviderError::RequestFailed {
                        provider: PROVIDER.to_string(),
                        status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        // LocationIQ answers 404 for "no results found"; that is data
        // absence, not a transport fault.
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let places: Vec<Place> = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self::map_places(key, places))
    }
}

impl std::fmt::Debug for LocationIqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationIqProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
