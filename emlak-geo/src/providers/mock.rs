//! Mock provider for testing resolver fallback behavior.

use async_trait::async_trait;
use emlak_core::{AddressComponent, EmlakResult, GeoKey, ProviderError};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::GeoProvider;

/// Scripted adapter: returns a fixed answer (components, empty, or an
/// error) for every query and counts invocations so tests can assert on
/// fallback ordering and cache behavior.
pub struct MockProvider {
    name: &'static str,
    components: Vec<AddressComponent>,
    error: Option<ProviderError>,
    available: bool,
    calls: AtomicUsize,
}

impl MockProvider {
    /// A provider that answers every query with `components`.
    pub fn returning(name: &'static str, components: Vec<AddressComponent>) -> Self {
        Self {
            name,
            components,
            error: None,
            available: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider with no data for any key.
    pub fn empty(name: &'static str) -> Self {
        Self::returning(name, Vec::new())
    }

    /// A provider whose every query fails with `error`.
    pub fn failing(name: &'static str, error: ProviderError) -> Self {
        Self {
            name,
            components: Vec::new(),
            error: Some(error),
            available: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider that reports itself unavailable (e.g. missing API key).
    pub fn unavailable(name: &'static str) -> Self {
        Self {
            name,
            components: Vec::new(),
            error: None,
            available: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `query` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl GeoProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn available(&self) -> bool {
        self.available
    }

    async fn query(&self, _key: &GeoKey) -> EmlakResult<Vec<AddressComponent>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match &self.error {
            Some(error) => Err(error.clone().into()),
            None => Ok(self.components.clone()),
        }
    }
}
