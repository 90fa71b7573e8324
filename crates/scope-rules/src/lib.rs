//! Feature documentation rules.
//!
//! Rules attach a documentation URL and a comment to a feature name. They are
//! supplied as JSON, either the bare `{feature: rule}` map or an envelope with
//! `version`, `metadata` and `rules`.
//!
//! Loading never fails: problems are logged, collected as
//! [`RuleLoadWarning`]s, and the affected entries (or the whole file) are
//! left out of the [`RuleTable`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use scope_rules::RuleEnricher;
//!
//! let (enricher, warnings) = RuleEnricher::from_path(Path::new("feature_rules.json"));
//! let url = enricher.get_documentation_url("Verify");
//! ```

#![deny(unsafe_code)]

mod enricher;
mod hash;
mod rule;
mod table;
mod validate;
mod warning;

pub use enricher::RuleEnricher;
pub use hash::sha256_hex;
pub use rule::{FeatureRule, IntegrationStep, REQUIRED_FIELDS, StepDef};
pub use table::{IN_MEMORY_SOURCE, RuleLoadOutcome, RuleSummary, RuleTable, UNKNOWN_VERSION};
pub use validate::{RuleValidationReport, ValidationStats, validate_rules_file, validate_rules_json};
pub use warning::RuleLoadWarning;
