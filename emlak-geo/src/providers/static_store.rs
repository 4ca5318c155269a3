//! Static reference store: curated hierarchical tables bundled at build time.

use async_trait::async_trait;
use emlak_core::{AddressComponent, ComponentKind, EmlakResult, GeoKey};
use emlak_core::key::normalize;
use once_cell::sync::Lazy;
use serde::Deserialize;

use super::GeoProvider;

const REFERENCE_JSON: &str = include_str!("../../data/reference.json");

static TABLES: Lazy<ReferenceTables> = Lazy::new(|| {
    serde_json::from_str(REFERENCE_JSON).expect("bundled reference data is valid JSON")
});

#[derive(Debug, Deserialize)]
struct ReferenceTables {
    countries: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    value: String,
    label: String,
    #[serde(default)]
    cities: Vec<CityEntry>,
}

#[derive(Debug, Deserialize)]
struct CityEntry {
    value: String,
    label: String,
    #[serde(default)]
    districts: Vec<DistrictEntry>,
}

#[derive(Debug, Deserialize)]
struct DistrictEntry {
    value: String,
    label: String,
    #[serde(default)]
    neighborhoods: Vec<LeafEntry>,
}

#[derive(Debug, Deserialize)]
struct LeafEntry {
    value: String,
    label: String,
}

/// A normalized key component matches an entry by canonical value or by
/// display label. Matching on both sides of the pair keeps locale spellings
/// ("İstanbul") and ASCII spellings ("istanbul") pointing at the same rows.
fn matches(entry_value: &str, entry_label: &str, wanted: &str) -> bool {
    normalize(entry_value) == wanted || normalize(entry_label) == wanted
}

/// Deterministic, zero-latency lookups over the bundled tables.
///
/// Pure reads over data parsed once on first access; returns an empty list
/// (never an error) when the requested level/key combination is not
/// curated. Entries never carry coordinates.
#[derive(Debug, Default)]
pub struct StaticStore;

impl StaticStore {
    pub fn new() -> Self {
        Self
    }

    fn lookup(&self, key: &GeoKey) -> Vec<AddressComponent> {
        let Some(country) = TABLES
            .countries
            .iter()
            .find(|c| matches(&c.value, &c.label, key.country()))
        else {
            return Vec::new();
        };

        match key.target() {
            ComponentKind::City => country
                .cities
                .iter()
                .map(|c| AddressComponent::new(ComponentKind::City, &c.value, &c.label))
                .collect(),
            ComponentKind::District => {
                let Some(city) = key
                    .city()
                    .and_then(|wanted| country.cities.iter().find(|c| matches(&c.value, &c.label, wanted)))
                else {
                    return Vec::new();
                };
                city.districts
                    .iter()
                    .map(|d| AddressComponent::new(ComponentKind::District, &d.value, &d.label))
                    .collect()
            }
            ComponentKind::Neighborhood => {
                let Some(city) = key
                    .city()
                    .and_then(|wanted| country.cities.iter().find(|c| matches(&c.value, &c.label, wanted)))
                else {
                    return Vec::new();
                };
                let Some(district) = key
                    .district()
                    .and_then(|wanted| city.districts.iter().find(|d| matches(&d.value, &d.label, wanted)))
                else {
                    return Vec::new();
                };
                district
                    .neighborhoods
                    .iter()
                    .map(|n| AddressComponent::new(ComponentKind::Neighborhood, &n.value, &n.label))
                    .collect()
            }
            // Streets are not curated; the HTTP providers cover them.
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl GeoProvider for StaticStore {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn query(&self, key: &GeoKey) -> EmlakResult<Vec<AddressComponent>> {
        Ok(self.lookup(key))
    }
}
