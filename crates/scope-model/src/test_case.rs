use serde::{Deserialize, Serialize};

use crate::enums::{Category, Environment};

/// Provider label carried by master rule cases.
pub const MASTER_PROVIDER: &str = "All Providers";

/// Payment method label carried by master rule cases.
pub const MASTER_PAYMENT_METHOD: &str = "All Payment Methods";

/// Feature name carried by master rule cases and their integration steps.
pub const MASTER_RULES_FEATURE: &str = "Master Rules";

/// Static catalog entry describing one test case to emit for a feature.
///
/// `description_key` is resolved against the active locale when cases are
/// generated, so one catalog serves every language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseTemplate {
    pub feature_name: String,
    pub category: Category,
    pub description_key: String,
    pub code_prefix: String,
}

/// A generated, uniquely identified test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// `<PREFIX><0000>.<suffix>`, e.g. `VRF0001.ai5xgb`.
    pub id: String,
    pub provider: String,
    pub payment_method: String,
    pub feature_name: String,
    pub category: Category,
    pub description: String,
    pub environment: Environment,
}

impl TestCase {
    /// The reproducible part of the id (prefix and sequence, no suffix).
    pub fn stable_id(&self) -> &str {
        self.id.split_once('.').map_or(self.id.as_str(), |(head, _)| head)
    }

    /// True for merchant-wide master rule cases. Matrix columns never
    /// produce this feature, whatever their provider labels say.
    pub fn is_master(&self) -> bool {
        self.feature_name == MASTER_RULES_FEATURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_id_strips_suffix() {
        let case = TestCase {
            id: "VRF0001.ai5xgb".to_string(),
            provider: "REDE".to_string(),
            payment_method: "CARD".to_string(),
            feature_name: "Verify".to_string(),
            category: Category::HappyPath,
            description: "Verify a valid card".to_string(),
            environment: Environment::Both,
        };
        assert_eq!(case.stable_id(), "VRF0001");
        assert!(!case.is_master());
    }

    #[test]
    fn master_is_decided_by_feature() {
        let column = TestCase {
            id: "VRF0001.ai5xgb".to_string(),
            provider: MASTER_PROVIDER.to_string(),
            payment_method: MASTER_PAYMENT_METHOD.to_string(),
            feature_name: "Verify".to_string(),
            category: Category::HappyPath,
            description: String::new(),
            environment: Environment::Both,
        };
        assert!(!column.is_master());

        let master = TestCase {
            id: "MST0001.ai5xgb".to_string(),
            feature_name: MASTER_RULES_FEATURE.to_string(),
            ..column
        };
        assert!(master.is_master());
    }
}
