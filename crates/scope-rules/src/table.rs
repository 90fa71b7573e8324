//! Immutable rule table snapshots.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::hash::sha256_hex;
use crate::rule::{FeatureRule, parse_entry, split_document};
use crate::warning::RuleLoadWarning;

/// Source label for tables parsed from memory.
pub const IN_MEMORY_SOURCE: &str = "<memory>";

/// Version reported when the document does not declare one.
pub const UNKNOWN_VERSION: &str = "unknown";

/// A loaded set of feature rules.
///
/// Tables are never mutated after loading; a reload builds a new table.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: BTreeMap<String, FeatureRule>,
    version: String,
    metadata: Map<String, Value>,
    source: String,
    loaded_at: DateTime<Utc>,
    fingerprint: Option<String>,
}

/// Summary of a loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub total_rules: usize,
    pub version: String,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
    /// SHA-256 of the raw file bytes; `None` when nothing was read.
    pub fingerprint: Option<String>,
}

/// A table together with every problem recovered while building it.
#[derive(Debug, Clone)]
pub struct RuleLoadOutcome {
    pub table: RuleTable,
    pub warnings: Vec<RuleLoadWarning>,
}

impl RuleLoadOutcome {
    fn degraded(source: String, fingerprint: Option<String>, warning: RuleLoadWarning) -> Self {
        tracing::warn!(%source, %warning, "using empty rule set");
        let mut table = RuleTable::empty_from(source);
        table.fingerprint = fingerprint;
        Self {
            table,
            warnings: vec![warning],
        }
    }
}

impl RuleTable {
    /// A table with no rules.
    pub fn empty() -> Self {
        Self::empty_from(IN_MEMORY_SOURCE.to_string())
    }

    fn empty_from(source: String) -> Self {
        Self {
            rules: BTreeMap::new(),
            version: UNKNOWN_VERSION.to_string(),
            metadata: Map::new(),
            source,
            loaded_at: Utc::now(),
            fingerprint: None,
        }
    }

    /// Loads a rule file. Never fails: a missing or unreadable file or
    /// invalid content yields an empty table plus a warning, and invalid
    /// entries are dropped one by one.
    pub fn load(path: &Path) -> RuleLoadOutcome {
        let source = path.display().to_string();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let warning = if e.kind() == std::io::ErrorKind::NotFound {
                    RuleLoadWarning::FileNotFound {
                        path: path.to_path_buf(),
                    }
                } else {
                    RuleLoadWarning::Unreadable {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }
                };
                return RuleLoadOutcome::degraded(source, None, warning);
            }
        };
        Self::from_bytes(&bytes, source)
    }

    /// Parses rule JSON held in memory.
    pub fn parse(content: &str) -> RuleLoadOutcome {
        Self::from_bytes(content.as_bytes(), IN_MEMORY_SOURCE.to_string())
    }

    fn from_bytes(bytes: &[u8], source: String) -> RuleLoadOutcome {
        let fingerprint = Some(sha256_hex(bytes));

        let value: Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(e) => {
                let warning = RuleLoadWarning::InvalidJson {
                    message: e.to_string(),
                };
                return RuleLoadOutcome::degraded(source, fingerprint, warning);
            }
        };

        let document = match split_document(&value) {
            Ok(document) => document,
            Err(warning) => return RuleLoadOutcome::degraded(source, fingerprint, warning),
        };

        let mut rules = BTreeMap::new();
        let mut warnings = Vec::new();
        for (feature, entry) in document.rules {
            match parse_entry(feature, entry) {
                Ok((rule, step_warning)) => {
                    if let Some(warning) = step_warning {
                        tracing::warn!(%source, feature = %feature, %warning, "rule entry");
                        warnings.push(warning);
                    }
                    rules.insert(feature.clone(), rule);
                }
                Err(warning) => {
                    tracing::warn!(%source, feature = %feature, %warning, "rule entry dropped");
                    warnings.push(warning);
                }
            }
        }

        let table = Self {
            rules,
            version: document
                .version
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            metadata: document.metadata,
            source,
            loaded_at: Utc::now(),
            fingerprint,
        };

        tracing::info!(
            source = %table.source,
            rules = table.len(),
            version = %table.version,
            dropped = warnings.len(),
            "loaded feature rules"
        );

        RuleLoadOutcome { table, warnings }
    }

    /// Rule stored under `feature_name` (exact, case-sensitive).
    pub fn get(&self, feature_name: &str) -> Option<&FeatureRule> {
        self.rules.get(feature_name)
    }

    pub fn has_rule(&self, feature_name: &str) -> bool {
        self.rules.contains_key(feature_name)
    }

    /// Feature names with a rule, sorted.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn summary(&self) -> RuleSummary {
        RuleSummary {
            total_rules: self.len(),
            version: self.version.clone(),
            loaded_at: self.loaded_at,
            source: self.source.clone(),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::empty()
    }
}
