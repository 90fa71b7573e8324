//! Type-safe enumerations for test case classification.
//!
//! These enums replace the free-form strings used in scoping sheets and
//! rule files ("happy path", "sandbox", ...) with closed sets that the
//! generator can match on exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Test case category.
///
/// Ordering follows the declaration order, which is also the order used
/// when statistics are reported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Normal flow.
    HappyPath,
    /// Error handling.
    UnhappyPath,
    /// Edge and boundary conditions.
    CornerCase,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::HappyPath,
        Category::UnhappyPath,
        Category::CornerCase,
    ];

    /// Machine identifier, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HappyPath => "happy_path",
            Category::UnhappyPath => "unhappy_path",
            Category::CornerCase => "corner_case",
        }
    }

    /// Human-readable label used in rendered documents.
    pub fn label(&self) -> &'static str {
        match self {
            Category::HappyPath => "happy path",
            Category::UnhappyPath => "unhappy path",
            Category::CornerCase => "corner case",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    /// Accepts the serialized form as well as the spaced and hyphenated
    /// spellings found in older rule files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "happy_path" => Ok(Category::HappyPath),
            "unhappy_path" => Ok(Category::UnhappyPath),
            "corner_case" => Ok(Category::CornerCase),
            _ => Err(ModelError::unknown("category", s)),
        }
    }
}

/// Deployment environment a generated test case applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    Production,
    Both,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
            Environment::Both => "both",
        }
    }

    /// True for cases that belong in the sandbox group.
    pub fn applies_to_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox | Environment::Both)
    }

    /// True for cases that belong in the production group.
    pub fn applies_to_production(&self) -> bool {
        matches!(self, Environment::Production | Environment::Both)
    }

    /// True if a case tagged `self` belongs in the `target` group.
    pub fn applies_to(&self, target: Environment) -> bool {
        match target {
            Environment::Sandbox => self.applies_to_sandbox(),
            Environment::Production => self.applies_to_production(),
            Environment::Both => true,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            "both" => Ok(Environment::Both),
            _ => Err(ModelError::unknown("environment", s)),
        }
    }
}

/// Per-feature environment classification.
///
/// Untagged features default to [`EnvironmentTag::Both`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentTag {
    SandboxOnly,
    ProductionOnly,
    #[default]
    Both,
}

impl EnvironmentTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentTag::SandboxOnly => "sandbox_only",
            EnvironmentTag::ProductionOnly => "production_only",
            EnvironmentTag::Both => "both",
        }
    }

    /// The environment stamped on every case generated for the feature.
    pub fn environment(&self) -> Environment {
        match self {
            EnvironmentTag::SandboxOnly => Environment::Sandbox,
            EnvironmentTag::ProductionOnly => Environment::Production,
            EnvironmentTag::Both => Environment::Both,
        }
    }
}

impl fmt::Display for EnvironmentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "sandbox_only" | "sandbox" => Ok(EnvironmentTag::SandboxOnly),
            "production_only" | "production" => Ok(EnvironmentTag::ProductionOnly),
            "both" => Ok(EnvironmentTag::Both),
            _ => Err(ModelError::unknown("environment tag", s)),
        }
    }
}

/// Requested output view of a generation run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    /// Two groups, sandbox and production.
    #[default]
    Separated,
    /// Sandbox cases only.
    Sandbox,
    /// Production cases only.
    Production,
}

impl EnvironmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentMode::Separated => "separated",
            EnvironmentMode::Sandbox => "sandbox",
            EnvironmentMode::Production => "production",
        }
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "separated" => Ok(EnvironmentMode::Separated),
            "sandbox" => Ok(EnvironmentMode::Sandbox),
            "production" => Ok(EnvironmentMode::Production),
            _ => Err(ModelError::unknown("environment mode", s)),
        }
    }
}

/// Which feature records are eligible to produce test cases.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FeatureGate {
    /// Every record whose feature name has a catalog entry.
    #[default]
    Catalog,
    /// Catalog features whose value is an implemented marker (`TRUE`, `YES`, ...).
    Implemented,
}

impl FeatureGate {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureGate::Catalog => "catalog",
            FeatureGate::Implemented => "implemented",
        }
    }
}

impl fmt::Display for FeatureGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureGate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "catalog" => Ok(FeatureGate::Catalog),
            "implemented" => Ok(FeatureGate::Implemented),
            _ => Err(ModelError::unknown("feature gate", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_legacy_spellings() {
        assert_eq!("happy path".parse::<Category>(), Ok(Category::HappyPath));
        assert_eq!("Unhappy-Path".parse::<Category>(), Ok(Category::UnhappyPath));
        assert_eq!("corner_case".parse::<Category>(), Ok(Category::CornerCase));
        assert!("smoke".parse::<Category>().is_err());
    }

    #[test]
    fn environment_membership() {
        assert!(Environment::Both.applies_to_sandbox());
        assert!(Environment::Both.applies_to_production());
        assert!(Environment::Sandbox.applies_to_sandbox());
        assert!(!Environment::Sandbox.applies_to_production());
        assert!(!Environment::Production.applies_to(Environment::Sandbox));
    }

    #[test]
    fn tag_defaults_to_both() {
        assert_eq!(EnvironmentTag::default(), EnvironmentTag::Both);
        assert_eq!(
            "production_only".parse::<EnvironmentTag>().map(|t| t.environment()),
            Ok(Environment::Production)
        );
    }

    #[test]
    fn serde_names_are_stable() {
        let json = serde_json::to_string(&Category::CornerCase).unwrap();
        assert_eq!(json, "\"corner_case\"");
        let json = serde_json::to_string(&EnvironmentTag::SandboxOnly).unwrap();
        assert_eq!(json, "\"sandbox_only\"");
        let mode: EnvironmentMode = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(mode, EnvironmentMode::Production);
    }
}
