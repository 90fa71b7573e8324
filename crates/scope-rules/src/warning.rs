//! Recoverable problems found while loading a rule file.

use std::path::PathBuf;

use thiserror::Error;

/// A rule-file problem that was recovered locally.
///
/// File-level warnings leave the snapshot empty; entry-level warnings drop
/// only the affected rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RuleLoadWarning {
    #[error("rules file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read rules file {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("invalid JSON in rules file: {message}")]
    InvalidJson { message: String },

    #[error("rules file must be a JSON object")]
    NotAnObject,

    #[error("rules file has no 'rules' section")]
    MissingRulesSection,

    #[error("skipping rule '{feature}': not an object")]
    EntryNotAnObject { feature: String },

    #[error("skipping rule '{feature}': missing required fields {fields:?}")]
    MissingFields {
        feature: String,
        fields: Vec<&'static str>,
    },

    #[error("ignoring integration steps of rule '{feature}': {message}")]
    InvalidIntegrationSteps { feature: String, message: String },
}

impl RuleLoadWarning {
    /// True when the whole file was discarded.
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::Unreadable { .. }
                | Self::InvalidJson { .. }
                | Self::NotAnObject
                | Self::MissingRulesSection
        )
    }
}
