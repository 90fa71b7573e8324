//! Static feature → template catalog.

use std::collections::BTreeMap;

use serde::Deserialize;

use scope_model::{Category, EnvironmentTag, Locale, MASTER_RULES_FEATURE, TestCaseTemplate};

use crate::embedded;
use crate::error::{CatalogError, Result};
use crate::locale::LocaleTable;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    master: Option<FeatureDef>,
    features: Vec<FeatureDef>,
}

#[derive(Debug, Deserialize)]
struct FeatureDef {
    feature_name: String,
    code_prefix: String,
    #[serde(default)]
    environment: EnvironmentTag,
    templates: Vec<TemplateDef>,
}

#[derive(Debug, Deserialize)]
struct TemplateDef {
    category: Category,
    description_key: String,
}

/// A catalog feature with its ordered templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureEntry {
    pub feature_name: String,
    pub code_prefix: String,
    /// Default environment tag; overridable through
    /// [`EnvironmentPolicy`](crate::EnvironmentPolicy).
    pub environment: EnvironmentTag,
    pub templates: Vec<TestCaseTemplate>,
}

impl FeatureEntry {
    fn from_def(def: FeatureDef) -> Result<Self> {
        let feature_name = def.feature_name.trim().to_string();
        let code_prefix = def.code_prefix.trim().to_string();
        if code_prefix.is_empty() {
            return Err(CatalogError::MissingPrefix {
                feature: feature_name,
            });
        }
        let templates = def
            .templates
            .into_iter()
            .map(|template| TestCaseTemplate {
                feature_name: feature_name.clone(),
                category: template.category,
                description_key: template.description_key,
                code_prefix: code_prefix.clone(),
            })
            .collect();
        Ok(Self {
            feature_name,
            code_prefix,
            environment: def.environment,
            templates,
        })
    }
}

/// Read-only template catalog plus the locale tables its descriptions
/// resolve against.
///
/// Feature lookup is by exact, case-sensitive name. A name without an entry
/// has no templates.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    version: String,
    features: Vec<FeatureEntry>,
    index: BTreeMap<String, usize>,
    master: Option<FeatureEntry>,
    locales: BTreeMap<Locale, LocaleTable>,
}

impl TemplateCatalog {
    /// The catalog compiled into this crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json(embedded::CATALOG, embedded::LOCALES)
    }

    /// Build a catalog from catalog JSON and `(locale code, table JSON)`
    /// pairs.
    pub fn from_json<'a>(
        catalog: &str,
        locales: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(catalog).map_err(|source| CatalogError::Parse {
                what: "template catalog".to_string(),
                source,
            })?;

        let mut features = Vec::with_capacity(file.features.len());
        let mut index = BTreeMap::new();
        for def in file.features {
            let entry = FeatureEntry::from_def(def)?;
            if entry.feature_name == MASTER_RULES_FEATURE {
                return Err(CatalogError::MasterName {
                    feature: entry.feature_name,
                });
            }
            if index
                .insert(entry.feature_name.clone(), features.len())
                .is_some()
            {
                return Err(CatalogError::DuplicateFeature {
                    feature: entry.feature_name,
                });
            }
            features.push(entry);
        }

        let master = file.master.map(FeatureEntry::from_def).transpose()?;
        if let Some(entry) = &master
            && entry.feature_name != MASTER_RULES_FEATURE
        {
            return Err(CatalogError::MasterName {
                feature: entry.feature_name.clone(),
            });
        }

        let mut tables = BTreeMap::new();
        for (code, content) in locales {
            let locale = Locale::new(code).map_err(|_| CatalogError::UnsupportedLocale {
                locale: code.to_string(),
            })?;
            let table = LocaleTable::from_json(locale.clone(), content)?;
            tables.insert(locale, table);
        }

        tracing::debug!(
            features = features.len(),
            locales = tables.len(),
            "loaded template catalog"
        );

        Ok(Self {
            version: file.version.unwrap_or_else(|| "unknown".to_string()),
            features,
            index,
            master,
            locales: tables,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Catalog features in declaration order.
    pub fn features(&self) -> &[FeatureEntry] {
        &self.features
    }

    pub fn feature(&self, feature_name: &str) -> Option<&FeatureEntry> {
        self.index.get(feature_name).map(|&i| &self.features[i])
    }

    pub fn contains(&self, feature_name: &str) -> bool {
        self.index.contains_key(feature_name)
    }

    /// Templates for `feature_name` in catalog order; empty when the
    /// feature is unknown.
    pub fn templates_for(&self, feature_name: &str) -> &[TestCaseTemplate] {
        self.feature(feature_name)
            .map(|entry| entry.templates.as_slice())
            .unwrap_or_default()
    }

    /// Default environment tag of a feature (`Both` when unknown).
    pub fn environment_tag(&self, feature_name: &str) -> EnvironmentTag {
        self.feature(feature_name)
            .map(|entry| entry.environment)
            .unwrap_or_default()
    }

    /// Merchant-wide master entry, if the catalog defines one.
    pub fn master(&self) -> Option<&FeatureEntry> {
        self.master.as_ref()
    }

    pub fn master_templates(&self) -> &[TestCaseTemplate] {
        self.master
            .as_ref()
            .map(|entry| entry.templates.as_slice())
            .unwrap_or_default()
    }

    pub fn supported_locales(&self) -> impl Iterator<Item = &Locale> {
        self.locales.keys()
    }

    pub fn supports(&self, locale: &Locale) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn locale_table(&self, locale: &Locale) -> Result<&LocaleTable> {
        self.locales
            .get(locale)
            .ok_or_else(|| CatalogError::UnsupportedLocale {
                locale: locale.to_string(),
            })
    }

    /// Description of `template` in `locale`.
    pub fn describe(&self, template: &TestCaseTemplate, locale: &Locale) -> Result<&str> {
        self.locale_table(locale)?.require(&template.description_key)
    }

    /// Every description key the catalog references, master entry included.
    pub fn description_keys(&self) -> impl Iterator<Item = &str> {
        self.master
            .iter()
            .chain(&self.features)
            .flat_map(|entry| &entry.templates)
            .map(|template| template.description_key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "features": [
            {
                "feature_name": "Verify",
                "code_prefix": "VRF",
                "templates": [
                    { "category": "happy_path", "description_key": "tc.verify.ok" },
                    { "category": "unhappy_path", "description_key": "tc.verify.bad" }
                ]
            }
        ]
    }"#;

    const EN: &str = r#"{"tc": {"verify": {"ok": "Verify ok", "bad": "Verify bad"}}}"#;

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = TemplateCatalog::from_json(CATALOG, [("en", EN)]).unwrap();
        assert_eq!(catalog.templates_for("Verify").len(), 2);
        assert!(catalog.templates_for("verify").is_empty());
        assert!(catalog.templates_for("Custom").is_empty());
        assert_eq!(catalog.version(), "unknown");
        assert!(catalog.master().is_none());
    }

    #[test]
    fn test_templates_carry_feature_and_prefix() {
        let catalog = TemplateCatalog::from_json(CATALOG, [("en", EN)]).unwrap();
        let templates = catalog.templates_for("Verify");
        assert!(templates.iter().all(|t| t.code_prefix == "VRF"));
        assert!(templates.iter().all(|t| t.feature_name == "Verify"));
        assert_eq!(templates[0].category, Category::HappyPath);
        assert_eq!(
            catalog.describe(&templates[1], &Locale::english()).unwrap(),
            "Verify bad"
        );
    }

    #[test]
    fn test_unknown_locale() {
        let catalog = TemplateCatalog::from_json(CATALOG, [("en", EN)]).unwrap();
        let template = &catalog.templates_for("Verify")[0];
        let err = catalog
            .describe(template, &Locale::new("fr").unwrap())
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedLocale { .. }));
        assert_eq!(err.locale(), Some("fr"));
    }

    #[test]
    fn test_duplicate_feature_rejected() {
        let catalog = r#"{"features": [
            {"feature_name": "Verify", "code_prefix": "VRF", "templates": []},
            {"feature_name": "Verify", "code_prefix": "VRX", "templates": []}
        ]}"#;
        let err = TemplateCatalog::from_json(catalog, std::iter::empty()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateFeature { .. }));
    }

    #[test]
    fn test_master_name_is_reserved() {
        let catalog = r#"{"features": [
            {"feature_name": "Master Rules", "code_prefix": "MST", "templates": []}
        ]}"#;
        let err = TemplateCatalog::from_json(catalog, std::iter::empty()).unwrap_err();
        assert!(matches!(err, CatalogError::MasterName { ref feature } if feature == "Master Rules"));

        let catalog = r#"{
            "master": {"feature_name": "Basics", "code_prefix": "MST", "templates": []},
            "features": []
        }"#;
        let err = TemplateCatalog::from_json(catalog, std::iter::empty()).unwrap_err();
        assert!(matches!(err, CatalogError::MasterName { ref feature } if feature == "Basics"));
    }
}
