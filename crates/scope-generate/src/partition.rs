//! Environment partitioning and output statistics.

use std::collections::{BTreeMap, BTreeSet};

use scope_model::{
    Environment, EnvironmentMode, EnvironmentSection, GenerationResult, GenerationStats, Locale,
    TestCase,
};

/// Assembles the requested view over `test_cases`.
///
/// - `Separated`: a sandbox section (sandbox and both) followed by a
///   production section (production and both). A `Both` case appears in
///   each section under the same id.
/// - `Sandbox` / `Production`: one section with only the matching cases.
///
/// Order within every section is the input order. Statistics are computed
/// over the final output; `recognized_features` is left at zero for the
/// caller to fill in.
pub fn partition(
    test_cases: Vec<TestCase>,
    mode: EnvironmentMode,
    locale: Locale,
) -> GenerationResult {
    let filter = |target: Environment| -> Vec<TestCase> {
        test_cases
            .iter()
            .filter(|case| case.environment.applies_to(target))
            .cloned()
            .collect()
    };

    let sections = match mode {
        EnvironmentMode::Separated => vec![
            EnvironmentSection {
                environment: Environment::Sandbox,
                test_cases: filter(Environment::Sandbox),
            },
            EnvironmentSection {
                environment: Environment::Production,
                test_cases: filter(Environment::Production),
            },
        ],
        EnvironmentMode::Sandbox => vec![EnvironmentSection {
            environment: Environment::Sandbox,
            test_cases: filter(Environment::Sandbox),
        }],
        EnvironmentMode::Production => vec![EnvironmentSection {
            environment: Environment::Production,
            test_cases: filter(Environment::Production),
        }],
    };

    let output: Vec<TestCase> = match mode {
        EnvironmentMode::Separated => test_cases,
        EnvironmentMode::Sandbox | EnvironmentMode::Production => sections
            .first()
            .map(|section| section.test_cases.clone())
            .unwrap_or_default(),
    };

    let stats = compute_stats(&output);

    tracing::debug!(
        mode = %mode,
        total = stats.total_test_cases,
        sandbox = stats.sandbox_test_cases,
        production = stats.production_test_cases,
        "partitioned test cases"
    );

    GenerationResult {
        mode,
        locale,
        test_cases: output,
        sections,
        stats,
    }
}

/// Counts over a final, flattened output.
pub fn compute_stats(output: &[TestCase]) -> GenerationStats {
    let mut by_category = BTreeMap::new();
    let mut groups = BTreeSet::new();
    for case in output {
        *by_category.entry(case.category).or_insert(0) += 1;
        if !case.is_master() {
            groups.insert((case.provider.as_str(), case.payment_method.as_str()));
        }
    }

    GenerationStats {
        total_test_cases: output.len(),
        sandbox_test_cases: output
            .iter()
            .filter(|case| case.environment.applies_to_sandbox())
            .count(),
        production_test_cases: output
            .iter()
            .filter(|case| case.environment.applies_to_production())
            .count(),
        by_category,
        combinations: groups.len(),
        recognized_features: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_model::Category;

    fn case(id: &str, environment: Environment) -> TestCase {
        TestCase {
            id: id.to_string(),
            provider: "REDE".to_string(),
            payment_method: "CARD".to_string(),
            feature_name: "Verify".to_string(),
            category: Category::HappyPath,
            description: String::new(),
            environment,
        }
    }

    fn cases() -> Vec<TestCase> {
        vec![
            case("A", Environment::Both),
            case("B", Environment::Sandbox),
            case("C", Environment::Production),
        ]
    }

    fn ids(cases: &[TestCase]) -> Vec<&str> {
        cases.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn separated_shares_both_cases() {
        let result = partition(cases(), EnvironmentMode::Separated, Locale::english());
        assert_eq!(ids(result.sandbox().unwrap()), vec!["A", "B"]);
        assert_eq!(ids(result.production().unwrap()), vec!["A", "C"]);
        assert_eq!(result.stats.total_test_cases, 3);
        assert_eq!(result.stats.sandbox_test_cases, 2);
        assert_eq!(result.stats.production_test_cases, 2);
        assert_eq!(result.stats.combinations, 1);
    }

    #[test]
    fn single_mode_filters() {
        let result = partition(cases(), EnvironmentMode::Production, Locale::english());
        assert_eq!(ids(&result.test_cases), vec!["A", "C"]);
        assert_eq!(result.sections.len(), 1);
        assert!(result.sandbox().is_none());
        assert_eq!(result.stats.total_test_cases, 2);
        assert_eq!(result.stats.production_test_cases, 2);
        assert_eq!(result.stats.sandbox_test_cases, 1);
    }

    #[test]
    fn empty_input() {
        let result = partition(Vec::new(), EnvironmentMode::Separated, Locale::english());
        assert!(result.is_empty());
        assert_eq!(result.stats, GenerationStats::default());
        assert_eq!(result.sections.len(), 2);
    }

    #[test]
    fn combinations_skip_only_master_cases() {
        let mut labelled = case("A", Environment::Both);
        labelled.provider = scope_model::MASTER_PROVIDER.to_string();
        labelled.payment_method = scope_model::MASTER_PAYMENT_METHOD.to_string();
        let mut master = labelled.clone();
        master.id = "M".to_string();
        master.feature_name = scope_model::MASTER_RULES_FEATURE.to_string();

        let stats = compute_stats(&[master, labelled, case("B", Environment::Both)]);
        assert_eq!(stats.total_test_cases, 3);
        assert_eq!(stats.combinations, 2);
    }
}
