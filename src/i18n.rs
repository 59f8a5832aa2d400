//! Localized strings

use crate::publish::Localizer;
use std::collections::BTreeMap;
use tracing::warn;

const DEFAULT_STRINGS: &[(&str, &str)] = &[
    ("publish-err", "Could not publish:"),
    ("publish-prompt", "Publish your project?"),
    ("publish-option", "Publish"),
    ("save-option", "Save without publishing"),
    ("cancel-option", "Cancel"),
    ("publish-in-progress", "Publishing..."),
    ("code-errors", "Your code has unresolved errors. You can still publish."),
    ("view-url", "View at"),
    ("remix-url", "Remix at"),
    ("share-via", "Share via"),
];

/// String catalog with built-in English defaults
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    overrides: BTreeMap<String, String>,
}

impl Catalog {
    /// Create a catalog with only the built-in strings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog whose `overrides` take precedence over the defaults
    pub const fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }
}

impl Localizer for Catalog {
    fn get(&self, key: &str) -> String {
        if let Some(value) = self.overrides.get(key) {
            return value.clone();
        }
        DEFAULT_STRINGS
            .iter()
            .find(|(k, _)| *k == key)
            .map_or_else(
                || {
                    warn!(key, "missing localized string");
                    key.to_string()
                },
                |(_, v)| (*v).to_string(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_string() {
        assert_eq!(Catalog::new().get("publish-err"), "Could not publish:");
    }

    #[test]
    fn test_override_wins() {
        let catalog = Catalog::with_overrides(BTreeMap::from([(
            "publish-err".to_string(),
            "Publication impossible :".to_string(),
        )]));
        assert_eq!(catalog.get("publish-err"), "Publication impossible :");
        assert_eq!(catalog.get("remix-url"), "Remix at");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        assert_eq!(Catalog::new().get("no-such-key"), "no-such-key");
    }
}
