//! OpenCage forward-geocoding adapter (HTTP provider A).

use async_trait::async_trait;
use emlak_core::key::normalize;
use emlak_core::{AddressComponent, EmlakResult, GeoKey, ProviderError};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::{address_field_candidates, GeoProvider};
use crate::normalize::{clean_label, dedupe};

const PROVIDER: &str = "opencage";
const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Environment variable holding the OpenCage API key.
pub const API_KEY_ENV: &str = "OPENCAGE_API_KEY";

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    formatted: String,
    #[serde(default)]
    components: HashMap<String, serde_json::Value>,
    geometry: Option<OpenCageGeometry>,
}

#[derive(Debug, Deserialize)]
struct OpenCageGeometry {
    lat: f64,
    lng: f64,
}

/// OpenCage adapter. Unavailable for the whole process lifetime when no
/// API key is configured; the resolver then skips it without aborting the
/// chain.
pub struct OpenCageProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenCageProvider {
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

    /// Read the API key from `OPENCAGE_API_KEY`.
    pub fn from_env(timeout: Duration) -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok(), timeout)
    }

    fn map_results(key: &GeoKey, response: OpenCageResponse) -> Vec<AddressComponent> {
        let candidates = address_field_candidates(key.target());
        let components = response
            .results
            .into_iter()
            .filter_map(|result| {
                let raw = candidates
                    .iter()
                    .find_map(|field| result.components.get(*field))
                    .and_then(|v| v.as_str().map(str::to_string))
                    .or_else(|| {
                        result
                            .formatted
                            .split(',')
                            .next()
                            .map(|segment| segment.trim().to_string())
                    })?;
                let label = clean_label(&raw);
                if label.is_empty() {
                    return None;
                }
                let mut component = AddressComponent::new(key.target(), normalize(&label), label);
                if let Some(geometry) = result.geometry {
                    component = component.with_location(geometry.lat, geometry.lng);
                }
                Some(component)
            })
            .collect();
        dedupe(components)
    }
}

#[async_trait]
impl GeoProvider for OpenCageProvider {
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
                ("countrycode", key.country()),
                ("limit", "25"),
                ("no_annotations", "1"),
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
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: OpenCageResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self::map_results(key, body))
    }
}

impl std::fmt::Debug for OpenCageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenCageProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
