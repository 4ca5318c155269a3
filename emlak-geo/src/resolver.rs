//! Resolver: cache check → ordered provider fallback → cache population.

use emlak_core::{AddressComponent, ComponentKind, EmlakResult, GeoKey};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::CacheRegion;
use crate::providers::{GeoProvider, LocationIqProvider, OpenCageProvider, StaticStore};

/// Per-instance resolver configuration.
///
/// The reference levels (cities, districts, neighborhoods) change rarely
/// and keep a long TTL; street data is refreshed far more often. The two
/// values are deliberately independent.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// TTL for the city, district, and neighborhood cache regions.
    pub reference_ttl: Duration,
    /// TTL for the street cache region.
    pub street_ttl: Duration,
    /// Request timeout applied to each HTTP provider call.
    pub provider_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            reference_ttl: Duration::from_secs(24 * 60 * 60),
            street_ttl: Duration::from_secs(30 * 60),
            provider_timeout: Duration::from_secs(10),
        }
    }
}

/// Entry counts per cache region, exposed for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub cities: usize,
    pub districts: usize,
    pub neighborhoods: usize,
    pub streets: usize,
}

/// The single entry point per hierarchy level.
///
/// For each request: the key tuple is normalized at construction, the
/// level's cache region is checked, and on a miss the adapters are walked
/// in fixed order — static store, then the HTTP providers — until one
/// returns a non-empty list. The first non-empty result is cached and
/// returned; there is no merging or scoring. Provider calls are awaited
/// sequentially so the static store short-circuits network traffic.
pub struct GeoResolver {
    providers: Vec<Arc<dyn GeoProvider>>,
    cities: CacheRegion,
    districts: CacheRegion,
    neighborhoods: CacheRegion,
    streets: CacheRegion,
}

impl GeoResolver {
    /// Build the default adapter chain: static store first, then OpenCage
    /// and LocationIQ with keys from the environment.
    pub fn from_env(config: &ResolverConfig) -> Self {
        let providers: Vec<Arc<dyn GeoProvider>> = vec![
            Arc::new(StaticStore::new()),
            Arc::new(OpenCageProvider::from_env(config.provider_timeout)),
            Arc::new(LocationIqProvider::from_env(config.provider_timeout)),
        ];
        Self::with_providers(providers, config)
    }

    /// Build a resolver over an explicit adapter chain. The iteration
    /// order of `providers` is the fallback order.
    pub fn with_providers(providers: Vec<Arc<dyn GeoProvider>>, config: &ResolverConfig) -> Self {
        Self {
            providers,
            cities: CacheRegion::new(config.reference_ttl),
            districts: CacheRegion::new(config.reference_ttl),
            neighborhoods: CacheRegion::new(config.reference_ttl),
            streets: CacheRegion::new(config.street_ttl),
        }
    }

    pub async fn resolve_cities(&self, country: &str) -> EmlakResult<Vec<AddressComponent>> {
        let key = GeoKey::for_cities(country)?;
        self.resolve(&key).await
    }

    pub async fn resolve_districts(
        &self,
        country: &str,
        city: &str,
    ) -> EmlakResult<Vec<AddressComponent>> {
        let key = GeoKey::for_districts(country, city)?;
        self.resolve(&key).await
    }

    pub async fn resolve_neighborhoods(
        &self,
        country: &str,
        city: &str,
        district: &str,
    ) -> EmlakResult<Vec<AddressComponent>> {
        let key = GeoKey::for_neighborhoods(country, city, district)?;
        self.resolve(&key).await
    }

    pub async fn resolve_streets(
        &self,
        country: &str,
        city: &str,
        district: &str,
        neighborhood: &str,
    ) -> EmlakResult<Vec<AddressComponent>> {
        let key = GeoKey::for_streets(country, city, district, neighborhood)?;
        self.resolve(&key).await
    }

    /// Snapshot of current cache occupancy, including not-yet-evicted
    /// stale entries.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            cities: self.cities.len(),
            districts: self.districts.len(),
            neighborhoods: self.neighborhoods.len(),
            streets: self.streets.len(),
        }
    }

    /// Number of adapters in the chain currently able to serve queries.
    pub fn available_providers(&self) -> usize {
        self.providers.iter().filter(|p| p.available()).count()
    }

    /// Empty every cache region. Administrative entry point for tests and
    /// operational tooling.
    pub fn clear_cache(&self) {
        self.cities.clear(None);
        self.districts.clear(None);
        self.neighborhoods.clear(None);
        self.streets.clear(None);
    }

    fn region(&self, kind: ComponentKind) -> &CacheRegion {
        match kind {
            ComponentKind::District => &self.districts,
            ComponentKind::Neighborhood => &self.neighborhoods,
            ComponentKind::Street => &self.streets,
            // City is the shallowest level the public entry points build;
            // country/state keys only occur with custom GeoKey values and
            // share the long-lived region.
            ComponentKind::City | ComponentKind::Country | ComponentKind::State => &self.cities,
        }
    }

    async fn resolve(&self, key: &GeoKey) -> EmlakResult<Vec<AddressComponent>> {
        let region = self.region(key.target());
        let cache_key = key.cache_key();

        if let Some(hit) = region.get(&cache_key) {
            debug!(level = %key.target(), key = %cache_key, "cache hit");
            return Ok(hit);
        }

        for provider in &self.providers {
            if !provider.available() {
                debug!(provider = provider.name(), "skipping unavailable provider");
                continue;
            }
            match provider.query(key).await {
                Ok(components) if !components.is_empty() => {
                    debug!(
                        provider = provider.name(),
                        level = %key.target(),
                        count = components.len(),
                        "resolved"
                    );
                    region.put(cache_key, components.clone());
                    return Ok(components);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider lookup failed");
                }
            }
        }

        // Every adapter came back empty. Do not cache: a later retry after
        // an upstream outage must not be suppressed by a false negative.
        Ok(Vec::new())
    }
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver")
            .field("providers", &self.providers.len())
            .field("cities", &self.cities)
            .field("districts", &self.districts)
            .field("neighborhoods", &self.neighborhoods)
            .field("streets", &self.streets)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;
    use emlak_core::{EmlakError, ProviderError, ValidationError};

    fn districts(values: &[&str]) -> Vec<AddressComponent> {
        values
            .iter()
            .map(|v| AddressComponent::new(ComponentKind::District, *v, *v))
            .collect()
    }

    fn resolver_with(
        providers: Vec<Arc<dyn GeoProvider>>,
    ) -> GeoResolver {
        GeoResolver::with_providers(providers, &ResolverConfig::default())
    }

    #[tokio::test]
    async fn test_fallback_stops_at_first_non_empty() {
        let static_mock = Arc::new(MockProvider::empty("static"));
        let provider_a = Arc::new(MockProvider::returning("a", districts(&["kadıköy"])));
        let provider_b = Arc::new(MockProvider::returning("b", districts(&["maltepe"])));
        let resolver = resolver_with(vec![
            static_mock.clone(),
            provider_a.clone(),
            provider_b.clone(),
        ]);

        let result = resolver.resolve_districts("tr", "istanbul").await.unwrap();
        assert_eq!(result, districts(&["kadıköy"]));
        assert_eq!(static_mock.calls(), 1);
        assert_eq!(provider_a.calls(), 1);
        assert_eq!(provider_b.calls(), 0);
    }

    #[tokio::test]
    async fn test_second_resolution_within_ttl_hits_cache() {
        let provider = Arc::new(MockProvider::returning("a", districts(&["kadıköy"])));
        let resolver = resolver_with(vec![provider.clone()]);

        let first = resolver.resolve_districts("tr", "istanbul").await.unwrap();
        let second = resolver.resolve_districts("tr", "istanbul").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_results_are_not_cached() {
        let provider = Arc::new(MockProvider::empty("a"));
        let resolver = resolver_with(vec![provider.clone()]);

        assert!(resolver
            .resolve_districts("xx", "nowhere")
            .await
            .unwrap()
            .is_empty());
        assert!(resolver
            .resolve_districts("xx", "nowhere")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_provider_is_skipped() {
        let disabled = Arc::new(MockProvider::unavailable("a"));
        let fallback = Arc::new(MockProvider::returning("b", districts(&["kadıköy"])));
        let resolver = resolver_with(vec![disabled.clone(), fallback.clone()]);

        let result = resolver.resolve_districts("tr", "istanbul").await.unwrap();
        assert!(!result.is_empty());
        assert_eq!(disabled.calls(), 0);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_provider_does_not_abort_chain() {
        let failing = Arc::new(MockProvider::failing(
            "a",
            ProviderError::Timeout {
                provider: "a".to_string(),
            },
        ));
        let fallback = Arc::new(MockProvider::returning("b", districts(&["kadıköy"])));
        let resolver = resolver_with(vec![failing.clone(), fallback.clone()]);

        let result = resolver.resolve_districts("tr", "istanbul").await.unwrap();
        assert_eq!(result, districts(&["kadıköy"]));
        assert_eq!(failing.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_all_failing_yields_empty_not_error() {
        let failing = Arc::new(MockProvider::failing(
            "a",
            ProviderError::RequestFailed {
                provider: "a".to_string(),
                status: 500,
                message: "upstream down".to_string(),
            },
        ));
        let resolver = resolver_with(vec![failing.clone()]);

        let result = resolver.resolve_districts("tr", "istanbul").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_differently_cased_keys_share_one_cache_entry() {
        let provider = Arc::new(MockProvider::returning("a", districts(&["kadıköy"])));
        let resolver = resolver_with(vec![provider.clone()]);

        resolver.resolve_districts("TR", "Istanbul").await.unwrap();
        resolver.resolve_districts("tr", "istanbul").await.unwrap();
        resolver.resolve_districts("tr", " Istanbul ").await.unwrap();
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_street_entry_triggers_fresh_resolution() {
        let provider = Arc::new(MockProvider::returning(
            "a",
            vec![AddressComponent::new(ComponentKind::Street, "moda", "Moda")],
        ));
        let config = ResolverConfig {
            street_ttl: Duration::ZERO,
            ..ResolverConfig::default()
        };
        let resolver = GeoResolver::with_providers(vec![provider.clone()], &config);

        resolver
            .resolve_streets("tr", "istanbul", "kadıköy", "moda")
            .await
            .unwrap();
        resolver
            .resolve_streets("tr", "istanbul", "kadıköy", "moda")
            .await
            .unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_street_ttl_independent_of_reference_ttl() {
        let provider = Arc::new(MockProvider::returning("a", districts(&["kadıköy"])));
        let config = ResolverConfig {
            street_ttl: Duration::ZERO,
            ..ResolverConfig::default()
        };
        let resolver = GeoResolver::with_providers(vec![provider.clone()], &config);

        // District region keeps the long TTL even when streets expire at once.
        resolver.resolve_districts("tr", "istanbul").await.unwrap();
        resolver.resolve_districts("tr", "istanbul").await.unwrap();
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_tuple_is_rejected_before_providers_run() {
        let provider = Arc::new(MockProvider::returning("a", districts(&["kadıköy"])));
        let resolver = resolver_with(vec![provider.clone()]);

        let err = resolver.resolve_districts("tr", "  ").await.unwrap_err();
        assert!(matches!(
            err,
            EmlakError::Validation(ValidationError::RequiredFieldMissing { .. })
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_reresolution() {
        let provider = Arc::new(MockProvider::returning("a", districts(&["kadıköy"])));
        let resolver = resolver_with(vec![provider.clone()]);

        resolver.resolve_districts("tr", "istanbul").await.unwrap();
        resolver.clear_cache();
        resolver.resolve_districts("tr", "istanbul").await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_cache_stats_track_resolutions() {
        let provider = Arc::new(MockProvider::returning("a", districts(&["kadıköy"])));
        let resolver = resolver_with(vec![provider]);

        let before = resolver.cache_stats();
        assert_eq!(before.districts, 0);

        resolver.resolve_districts("tr", "istanbul").await.unwrap();
        let after = resolver.cache_stats();
        assert_eq!(after.districts, 1);
        assert_eq!(after.cities, 0);
        assert_eq!(after.neighborhoods, 0);
        assert_eq!(after.streets, 0);
    }

    #[tokio::test]
    async fn test_available_providers_skips_disabled_adapters() {
        let resolver = resolver_with(vec![
            Arc::new(MockProvider::empty("a")),
            Arc::new(MockProvider::unavailable("b")),
            Arc::new(MockProvider::empty("c")),
        ]);
        assert_eq!(resolver.available_providers(), 2);
    }

    #[tokio::test]
    async fn test_static_store_serves_kadikoy_with_zero_network_calls() {
        let http_a = Arc::new(MockProvider::returning("a", districts(&["wrong"])));
        let http_b = Arc::new(MockProvider::returning("b", districts(&["wrong"])));
        let providers: Vec<Arc<dyn GeoProvider>> = vec![
            Arc::new(StaticStore::new()),
            http_a.clone(),
            http_b.clone(),
        ];
        let resolver = resolver_with(providers);

        let neighborhoods = resolver
            .resolve_neighborhoods("TR", "İstanbul", "Kadıköy")
            .await
            .unwrap();
        assert!(!neighborhoods.is_empty());
        assert!(neighborhoods
            .iter()
            .all(|n| n.kind == ComponentKind::Neighborhood));
        assert_eq!(http_a.calls(), 0);
        assert_eq!(http_b.calls(), 0);
    }
}
