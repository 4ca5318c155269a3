//! Resolved address entries and hierarchy levels.

use serde::{Deserialize, Serialize};

// ============================================================================
// HIERARCHY LEVELS
// ============================================================================

/// One rung in the address-resolution ladder.
///
/// Discriminates which hierarchy level an [`AddressComponent`] belongs to.
/// Within a single resolved list, every entry carries the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Country,
    State,
    City,
    District,
    Neighborhood,
    Street,
}

impl ComponentKind {
    /// The English word appended to provider query strings for this level
    /// (e.g. "Kadıköy Istanbul district").
    pub fn query_word(&self) -> &'static str {
        match self {
            ComponentKind::Country => "country",
            ComponentKind::State => "state",
            ComponentKind::City => "city",
            ComponentKind::District => "district",
            ComponentKind::Neighborhood => "neighborhood",
            ComponentKind::Street => "street",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_word())
    }
}

// ============================================================================
// ADDRESS COMPONENT
// ============================================================================

/// Latitude/longitude pair supplied by a geocoding provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One resolved entry at any hierarchy level.
///
/// `value` is the canonical identifier used as the key for the next level's
/// query; `label` is the display string and may differ from `value` by
/// casing or localization. `location` is present only when a geocoding
/// provider supplied coordinates — static-table entries never carry one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub value: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
}

impl AddressComponent {
    /// Create a component without coordinates (static-table entries).
    pub fn new(kind: ComponentKind, value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            kind,
            location: None,
        }
    }

    /// Attach provider-supplied coordinates.
    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some(Coordinates { lat, lon });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ComponentKind::Neighborhood).unwrap();
        assert_eq!(json, "\"neighborhood\"");
    }

    #[test]
    fn test_address_component_serializes_kind_as_type() {
        let component = AddressComponent::new(ComponentKind::City, "istanbul", "İstanbul");
        let json = serde_json::to_string(&component).unwrap();
        assert!(json.contains("\"type\":\"city\""));
        assert!(json.contains("\"value\":\"istanbul\""));
        assert!(json.contains("\"label\":\"İstanbul\""));
    }

    #[test]
    fn test_location_omitted_when_absent() {
        let component = AddressComponent::new(ComponentKind::District, "kadikoy", "Kadıköy");
        let json = serde_json::to_string(&component).unwrap();
        assert!(!json.contains("location"));
    }

    #[test]
    fn test_location_present_when_set() {
        let component = AddressComponent::new(ComponentKind::Street, "moda caddesi", "Moda Caddesi")
            .with_location(40.9832, 29.0257);
        let json = serde_json::to_string(&component).unwrap();
        assert!(json.contains("\"lat\":40.9832"));
        assert!(json.contains("\"lon\":29.0257"));
    }

    #[test]
    fn test_address_component_round_trip() {
        let component = AddressComponent::new(ComponentKind::City, "ankara", "Ankara")
            .with_location(39.9334, 32.8597);
        let json = serde_json::to_string(&component).unwrap();
        let back: AddressComponent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, component);
    }

    #[test]
    fn test_query_word() {
        assert_eq!(ComponentKind::Neighborhood.query_word(), "neighborhood");
        assert_eq!(ComponentKind::Street.query_word(), "street");
    }
}
