//! Per-feature environment classification.

use std::collections::BTreeMap;

use scope_model::EnvironmentTag;

use crate::catalog::TemplateCatalog;

/// Environment tag assignment: catalog defaults plus configured overrides.
///
/// Resolution order is override, then catalog default, then `Both`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentPolicy {
    defaults: BTreeMap<String, EnvironmentTag>,
    overrides: BTreeMap<String, EnvironmentTag>,
}

impl EnvironmentPolicy {
    /// Policy with no tags at all; every feature resolves to `Both`.
    pub fn untagged() -> Self {
        Self::default()
    }

    /// Policy seeded with the catalog's default tags, master entry included.
    pub fn from_catalog(catalog: &TemplateCatalog) -> Self {
        let defaults = catalog
            .master()
            .into_iter()
            .chain(catalog.features())
            .map(|entry| (entry.feature_name.clone(), entry.environment))
            .collect();
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, feature_name: impl Into<String>, tag: EnvironmentTag) -> Self {
        self.overrides.insert(feature_name.into(), tag);
        self
    }

    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, EnvironmentTag)>,
        S: Into<String>,
    {
        self.overrides
            .extend(overrides.into_iter().map(|(name, tag)| (name.into(), tag)));
        self
    }

    pub fn tag_for(&self, feature_name: &str) -> EnvironmentTag {
        self.overrides
            .get(feature_name)
            .or_else(|| self.defaults.get(feature_name))
            .copied()
            .unwrap_or_default()
    }

    pub fn overrides(&self) -> &BTreeMap<String, EnvironmentTag> {
        &self.overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_default() {
        let catalog = TemplateCatalog::embedded().unwrap();
        let policy = EnvironmentPolicy::from_catalog(&catalog)
            .with_override("Verify", EnvironmentTag::SandboxOnly)
            .with_overrides([("3DS", EnvironmentTag::Both)]);

        assert_eq!(policy.tag_for("Verify"), EnvironmentTag::SandboxOnly);
        assert_eq!(policy.tag_for("3DS"), EnvironmentTag::Both);
        assert_eq!(policy.tag_for("Webhooks"), EnvironmentTag::ProductionOnly);
        assert_eq!(policy.tag_for("Authorize"), EnvironmentTag::Both);
        assert_eq!(policy.tag_for("Unknown"), EnvironmentTag::Both);
    }

    #[test]
    fn untagged_policy_defaults_to_both() {
        assert_eq!(
            EnvironmentPolicy::untagged().tag_for("Webhooks"),
            EnvironmentTag::Both
        );
    }
}
