//! Provider adapters: interchangeable lookup strategies behind one contract.
//!
//! Three implementations ship with the service — the bundled static
//! reference store and two HTTP geocoders (OpenCage, LocationIQ). The
//! resolver walks them in a fixed order and stops at the first non-empty
//! result, so adapters must report "no data" as an empty list and reserve
//! errors for transport/credential faults.

pub mod locationiq;
pub mod mock;
pub mod opencage;
pub mod static_store;

pub use locationiq::LocationIqProvider;
pub use mock::MockProvider;
pub use opencage::OpenCageProvider;
pub use static_store::StaticStore;

use async_trait::async_trait;
use emlak_core::{AddressComponent, ComponentKind, EmlakResult, GeoKey};

/// A single data source implementing the common per-level query contract.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether this adapter can serve queries at all. HTTP adapters report
    /// `false` when their API key is missing, making them permanently
    /// unavailable for the process lifetime without aborting the chain.
    fn available(&self) -> bool {
        true
    }

    /// Look up the components at `key.target()` under the parent tuple.
    ///
    /// Returns an empty list when the source has no data for the key;
    /// errors are reserved for transport, credential, and decoding faults
    /// and are absorbed by the resolver.
    async fn query(&self, key: &GeoKey) -> EmlakResult<Vec<AddressComponent>>;
}

/// Response fields the HTTP geocoders use for each hierarchy level, in
/// preference order. Both OpenCage and LocationIQ follow the OSM address
/// vocabulary, so the table is shared.
pub(crate) fn address_field_candidates(kind: ComponentKind) -> &'static [&'static str] {
    match kind {
        ComponentKind::Country => &["country"],
        ComponentKind::State => &["state", "province"],
        ComponentKind::City => &["city", "town", "province"],
        ComponentKind::District => &["city_district", "district", "suburb", "county"],
        ComponentKind::Neighborhood => &["neighbourhood", "quarter", "suburb"],
        ComponentKind::Street => &["road", "street", "pedestrian"],
    }
}
