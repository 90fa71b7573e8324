//! Error types for catalog loading and locale resolution.

use thiserror::Error;

/// Errors raised while building a catalog or resolving its descriptions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Catalog or locale JSON could not be parsed.
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// The same feature name is listed twice.
    #[error("duplicate catalog feature '{feature}'")]
    DuplicateFeature { feature: String },

    /// A regular feature uses the name reserved for master rules, or the
    /// master entry uses any other name.
    #[error("catalog feature '{feature}' conflicts with the master rules entry")]
    MasterName { feature: String },

    /// A feature has an empty code prefix.
    #[error("catalog feature '{feature}' has no code prefix")]
    MissingPrefix { feature: String },

    /// No string table exists for the locale.
    #[error("locale '{locale}' is not supported")]
    UnsupportedLocale { locale: String },

    /// The locale table lacks a description key the catalog references.
    #[error("locale '{locale}' has no description for '{key}'")]
    MissingDescription { locale: String, key: String },
}

impl CatalogError {
    /// Locale named by a locale error, if any.
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::UnsupportedLocale { locale } | Self::MissingDescription { locale, .. } => {
                Some(locale)
            }
            _ => None,
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
