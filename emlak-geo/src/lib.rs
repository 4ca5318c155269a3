//! Emlak Geo - Multi-tier Geographic Reference Resolution
//!
//! Turns a partial address key (country, city, district, neighborhood) into
//! a list of [`emlak_core::AddressComponent`] at the next hierarchy level.
//!
//! Architecture:
//! - [`providers`] - interchangeable lookup adapters behind the
//!   [`providers::GeoProvider`] trait: the bundled static reference store
//!   plus the OpenCage and LocationIQ geocoders.
//! - [`cache`] - one TTL-boxed [`cache::CacheRegion`] per hierarchy level,
//!   lazily evicted on access.
//! - [`resolver`] - the [`resolver::GeoResolver`] orchestrating cache
//!   lookup, ordered provider fallback, and cache population.
//! - [`normalize`] - shared label cleaning and de-duplication applied to
//!   every provider's results.

pub mod cache;
pub mod normalize;
pub mod providers;
pub mod resolver;

pub use cache::CacheRegion;
pub use providers::{GeoProvider, LocationIqProvider, MockProvider, OpenCageProvider, StaticStore};
pub use resolver::{CacheStats, GeoResolver, ResolverConfig};
