//! Normalized hierarchy key tuples.

use crate::address::ComponentKind;
use crate::error::{EmlakResult, ValidationError};

/// Composite cache/lookup key: `(country, city?, district?, neighborhood?)`
/// plus the target hierarchy level being resolved.
///
/// Every component is trimmed and Unicode-lowercased at construction, so
/// `"Istanbul"`, `"istanbul"` and `" Istanbul "` produce the same key.
/// Absent optional components are omitted, never null-padded. Construction
/// fails when a required component is empty after trimming — the resolver
/// never runs with an incomplete tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeoKey {
    target: ComponentKind,
    country: String,
    city: Option<String>,
    district: Option<String>,
    neighborhood: Option<String>,
}

/// Trim and Unicode-lowercase one key component.
pub fn normalize(part: &str) -> String {
    part.trim().to_lowercase()
}

fn require(field: &'static str, part: &str) -> EmlakResult<String> {
    let normalized = normalize(part);
    if normalized.is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: field.to_string(),
        }
        .into());
    }
    Ok(normalized)
}

impl GeoKey {
    /// Key for resolving the cities of a country.
    pub fn for_cities(country: &str) -> EmlakResult<Self> {
        Ok(Self {
            target: ComponentKind::City,
            country: require("country", country)?,
            city: None,
            district: None,
            neighborhood: None,
        })
    }

    /// Key for resolving the districts of a city.
    pub fn for_districts(country: &str, city: &str) -> EmlakResult<Self> {
        Ok(Self {
            target: ComponentKind::District,
            country: require("country", country)?,
            city: Some(require("city", city)?),
            district: None,
            neighborhood: None,
        })
    }

    /// Key for resolving the neighborhoods of a district.
    pub fn for_neighborhoods(country: &str, city: &str, district: &str) -> EmlakResult<Self> {
        Ok(Self {
            target: ComponentKind::Neighborhood,
            country: require("country", country)?,
            city: Some(require("city", city)?),
            district: Some(require("district", district)?),
            neighborhood: None,
        })
    }

    /// Key for resolving the streets of a neighborhood.
    pub fn for_streets(
        country: &str,
        city: &str,
        district: &str,
        neighborhood: &str,
    ) -> EmlakResult<Self> {
        Ok(Self {
            target: ComponentKind::Street,
            country: require("country", country)?,
            city: Some(require("city", city)?),
            district: Some(require("district", district)?),
            neighborhood: Some(require("neighborhood", neighborhood)?),
        })
    }

    /// The hierarchy level this key resolves.
    pub fn target(&self) -> ComponentKind {
        self.target
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn neighborhood(&self) -> Option<&str> {
        self.neighborhood.as_deref()
    }

    /// Cache key string: present components joined with `|`.
    ///
    /// Absent components are omitted so keys for different levels never
    /// collide even within one region.
    pub fn cache_key(&self) -> String {
        let mut parts = vec![self.country.as_str()];
        parts.extend(self.city.as_deref());
        parts.extend(self.district.as_deref());
        parts.extend(self.neighborhood.as_deref());
        parts.join("|")
    }

    /// Natural-language query text for HTTP geocoding providers: the parent
    /// components from most specific to least, plus the target level's
    /// semantic word. The country is normally passed separately as a
    /// restriction parameter, but when no finer component exists (cities
    /// level) it is included so the text is never just the bare level word.
    pub fn query_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(self.neighborhood.as_deref());
        parts.extend(self.district.as_deref());
        parts.extend(self.city.as_deref());
        if parts.is_empty() {
            parts.push(self.country.as_str());
        }
        parts.push(self.target.query_word());
        parts.join(" ")
    }
}
