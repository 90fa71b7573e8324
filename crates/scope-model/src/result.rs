//! Environment-partitioned generation output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Category, Environment, EnvironmentMode};
use crate::locale::Locale;
use crate::test_case::TestCase;

/// One environment group of the requested view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSection {
    /// `Sandbox` or `Production`.
    pub environment: Environment,
    pub test_cases: Vec<TestCase>,
}

/// Counts computed over the final (post-filter) output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Distinct cases in the mode's output.
    pub total_test_cases: usize,
    /// Output cases applicable to sandbox.
    pub sandbox_test_cases: usize,
    /// Output cases applicable to production.
    pub production_test_cases: usize,
    pub by_category: BTreeMap<Category, usize>,
    /// Provider + payment method groups with at least one case (master rules excluded).
    pub combinations: usize,
    /// Feature records that produced at least one case.
    pub recognized_features: usize,
}

/// Everything one generation call produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub mode: EnvironmentMode,
    pub locale: Locale,
    /// Flattened output in generation order; every case appears once.
    pub test_cases: Vec<TestCase>,
    /// `Separated`: sandbox then production. Single modes: one section.
    pub sections: Vec<EnvironmentSection>,
    pub stats: GenerationStats,
}

impl GenerationResult {
    pub fn total(&self) -> usize {
        self.stats.total_test_cases
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }

    pub fn section(&self, environment: Environment) -> Option<&[TestCase]> {
        self.sections
            .iter()
            .find(|section| section.environment == environment)
            .map(|section| section.test_cases.as_slice())
    }

    pub fn sandbox(&self) -> Option<&[TestCase]> {
        self.section(Environment::Sandbox)
    }

    pub fn production(&self) -> Option<&[TestCase]> {
        self.section(Environment::Production)
    }

    pub fn find(&self, id: &str) -> Option<&TestCase> {
        self.test_cases.iter().find(|case| case.id == id)
    }
}
