//! Rule file validation reports.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::rule::{REQUIRED_FIELDS, missing_fields, split_document};
use crate::table::UNKNOWN_VERSION;
use crate::warning::RuleLoadWarning;

/// Entry counts of a validated rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub total_rules: usize,
    pub valid_rules: usize,
    pub invalid_rules: usize,
    pub version: String,
}

/// Outcome of validating a rule file without loading it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleValidationReport {
    /// True iff the document parsed and no entry is invalid.
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Present-but-blank fields. Warnings never make a file invalid.
    pub warnings: Vec<String>,
    /// `None` when the document could not be read as a rule document.
    pub stats: Option<ValidationStats>,
}

impl RuleValidationReport {
    fn failed(error: String) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
            warnings: Vec::new(),
            stats: None,
        }
    }
}

/// Validates rule JSON held in memory.
pub fn validate_rules_json(content: &str) -> RuleValidationReport {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => return RuleValidationReport::failed(format!("Invalid JSON format: {e}")),
    };

    let document = match split_document(&value) {
        Ok(document) => document,
        Err(RuleLoadWarning::MissingRulesSection) => {
            return RuleValidationReport::failed("Missing 'rules' section".to_string());
        }
        Err(warning) => return RuleValidationReport::failed(warning.to_string()),
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut valid_rules = 0;

    for (feature, entry) in document.rules {
        let Some(object) = entry.as_object() else {
            errors.push(format!("Rule '{feature}' is not an object"));
            continue;
        };

        let missing = missing_fields(object);
        if !missing.is_empty() {
            errors.push(format!("Rule '{feature}' missing fields: {missing:?}"));
            continue;
        }

        let empty: Vec<&str> = REQUIRED_FIELDS
            .into_iter()
            .filter(|field| {
                object
                    .get(*field)
                    .and_then(Value::as_str)
                    .is_some_and(|value| value.trim().is_empty())
            })
            .collect();
        if !empty.is_empty() {
            warnings.push(format!("Rule '{feature}' has empty fields: {empty:?}"));
        }

        valid_rules += 1;
    }

    let total_rules = document.rules.len();
    let invalid_rules = total_rules - valid_rules;

    RuleValidationReport {
        is_valid: invalid_rules == 0,
        errors,
        warnings,
        stats: Some(ValidationStats {
            total_rules,
            valid_rules,
            invalid_rules,
            version: document
                .version
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        }),
    }
}

/// Validates a rule file on disk.
pub fn validate_rules_file(path: &Path) -> RuleValidationReport {
    match std::fs::read_to_string(path) {
        Ok(content) => validate_rules_json(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => RuleValidationReport::failed(
            format!("Rules file '{}' does not exist", path.display()),
        ),
        Err(e) => RuleValidationReport::failed(format!(
            "Failed to read rules file '{}': {e}",
            path.display()
        )),
    }
}
