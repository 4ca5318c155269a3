//! Shared label normalization for provider results.
//!
//! Every adapter runs its results through this module before they re-enter
//! the resolver, so de-duplication and comparison stay provider-agnostic.

use emlak_core::AddressComponent;
use once_cell::sync::Lazy;
use regex::Regex;

/// Locale-specific suffixes that providers append to labels. Stripped so
/// labels are comparable across providers ("Moda Mahallesi" vs "Moda").
static LOCALE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s+(mahallesi|mahalle|mah\.?|caddesi|cadde|cad\.?|sokağı|sokak|sok\.?|district|neighbourhood|neighborhood|quarter|street|road)$",
    )
    .expect("locale suffix pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strip a trailing locale suffix and collapse interior whitespace.
pub fn clean_label(label: &str) -> String {
    let collapsed = WHITESPACE.replace_all(label.trim(), " ");
    let stripped = LOCALE_SUFFIX.replace(&collapsed, "");
    let stripped = stripped.trim();
    // A label that was nothing but a suffix stays as-is rather than
    // collapsing to an empty string.
    if stripped.is_empty() {
        collapsed.into_owned()
    } else {
        stripped.to_string()
    }
}

/// Remove duplicate components, comparing `value` case-insensitively.
/// The first occurrence wins and input order is preserved.
pub fn dedupe(components: Vec<AddressComponent>) -> Vec<AddressComponent> {
    let mut seen = std::collections::HashSet::new();
    components
        .into_iter()
        .filter(|component| seen.insert(component.value.to_lowercase()))
        .collect()
}
