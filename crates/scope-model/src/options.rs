//! Options controlling test case generation.

use serde::{Deserialize, Serialize};

use crate::enums::{EnvironmentMode, FeatureGate};
use crate::locale::Locale;

/// Options for one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Language used to resolve descriptions.
    pub locale: Locale,

    /// Requested view (separated, sandbox, production).
    pub environment_mode: EnvironmentMode,

    /// Which feature records may produce cases.
    pub feature_gate: FeatureGate,

    /// Emit the merchant-wide master cases ahead of everything else.
    /// Default: false.
    pub include_master_rules: bool,
}

impl GenerateOptions {
    pub fn new(locale: Locale, environment_mode: EnvironmentMode) -> Self {
        Self {
            locale,
            environment_mode,
            ..Default::default()
        }
    }

    pub fn with_feature_gate(mut self, gate: FeatureGate) -> Self {
        self.feature_gate = gate;
        self
    }

    pub fn with_master_rules(mut self, enable: bool) -> Self {
        self.include_master_rules = enable;
        self
    }
}
