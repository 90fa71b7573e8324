//! Configuration file support.
//!
//! An optional TOML file supplies defaults for the `generate` command:
//!
//! ```toml
//! [generate]
//! locale = "es"
//! environment = "separated"
//! feature_gate = "catalog"
//! include_master_rules = true
//! seed = 42
//!
//! [rules]
//! path = "feature_rules.json"
//!
//! [environments]
//! Webhooks = "production_only"
//! ```
//!
//! Command-line flags take precedence over file values, which take
//! precedence over built-in defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use scope_model::{EnvironmentMode, EnvironmentTag, FeatureGate, GenerateOptions, Locale};

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub generate: GenerateSection,
    pub rules: RulesSection,
    /// Per-feature environment tag overrides.
    pub environments: BTreeMap<String, EnvironmentTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSection {
    pub locale: Option<Locale>,
    pub environment: Option<EnvironmentMode>,
    pub feature_gate: Option<FeatureGate>,
    pub include_master_rules: Option<bool>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesSection {
    /// Relative paths are resolved against the configuration file's directory.
    pub path: Option<PathBuf>,
}

impl ConfigFile {
    /// Reads and parses `path`. A relative `[rules] path` is rebased onto
    /// the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config =
            Self::parse(&content).with_context(|| format!("parse config {}", path.display()))?;

        if let (Some(rules), Some(base)) = (config.rules.path.as_mut(), path.parent())
            && rules.is_relative()
        {
            *rules = base.join(&*rules);
        }

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Command-line values for the generate command; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub locale: Option<Locale>,
    pub environment: Option<EnvironmentMode>,
    pub feature_gate: Option<FeatureGate>,
    pub include_master_rules: Option<bool>,
    pub seed: Option<u64>,
    pub rules_path: Option<PathBuf>,
}

/// Effective generate settings after layering flags over the file over
/// defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSettings {
    pub options: GenerateOptions,
    pub seed: Option<u64>,
    pub rules_path: Option<PathBuf>,
    pub environments: BTreeMap<String, EnvironmentTag>,
}

/// Layers `overrides` over `file` over the defaults.
pub fn resolve(file: &ConfigFile, overrides: GenerateOverrides) -> ResolvedSettings {
    let defaults = GenerateOptions::default();
    let generate = &file.generate;

    let options = GenerateOptions {
        locale: overrides
            .locale
            .or_else(|| generate.locale.clone())
            .unwrap_or(defaults.locale),
        environment_mode: overrides
            .environment
            .or(generate.environment)
            .unwrap_or(defaults.environment_mode),
        feature_gate: overrides
            .feature_gate
            .or(generate.feature_gate)
            .unwrap_or(defaults.feature_gate),
        include_master_rules: overrides
            .include_master_rules
            .or(generate.include_master_rules)
            .unwrap_or(defaults.include_master_rules),
    };

    ResolvedSettings {
        options,
        seed: overrides.seed.or(generate.seed),
        rules_path: overrides.rules_path.or_else(|| file.rules.path.clone()),
        environments: file.environments.clone(),
    }
}
