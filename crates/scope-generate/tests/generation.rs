//! End-to-end generation tests: matrix in, partitioned test cases out.

use std::collections::HashSet;

use proptest::prelude::*;
use scope_generate::{GenerateError, RandomSuffix, TestCaseGenerator};
use scope_ingest::{IngestError, MatrixLayout};
use scope_model::{
    EnvironmentMode, FeatureGate, FeatureRecord, FeatureSet, GenerateOptions, Locale, RawMatrix,
    TestCase,
};

fn generator() -> TestCaseGenerator {
    TestCaseGenerator::embedded().expect("embedded catalog")
}

/// Deterministic suffixes `s00001`, `s00002`, ...
fn counting_suffixes() -> impl FnMut() -> String {
    let mut next = 0;
    move || {
        next += 1;
        format!("s{next:05}")
    }
}

fn rede_matrix() -> RawMatrix {
    RawMatrix::from_rows([
        vec!["Feature", "", ""],
        vec!["Provider", "REDE", "#N/A"],
        vec!["Payment Method", "CARD", "#N/A"],
        vec!["Verify", "TRUE", "TRUE"],
        vec!["Authorize", "TRUE", "TRUE"],
    ])
}

#[test]
fn rede_card_scenario_yields_six_cases() {
    let result = generator()
        .generate_from_matrix(
            &rede_matrix(),
            &MatrixLayout::default(),
            &GenerateOptions::default(),
            &mut RandomSuffix::seeded(11),
        )
        .unwrap();

    assert_eq!(result.total(), 6);
    let stable: Vec<&str> = result.test_cases.iter().map(TestCase::stable_id).collect();
    assert_eq!(
        stable,
        vec!["VRF0001", "VRF0002", "VRF0003", "ATH0001", "ATH0002", "ATH0003"]
    );
    assert!(
        result
            .test_cases
            .iter()
            .all(|c| c.provider == "REDE" && c.payment_method == "CARD")
    );
    assert_eq!(result.stats.combinations, 1);
}

#[test]
fn rede_card_snapshot() {
    let mut suffixes = counting_suffixes();
    let result = generator()
        .generate_from_matrix(
            &rede_matrix(),
            &MatrixLayout::default(),
            &GenerateOptions::default(),
            &mut suffixes,
        )
        .unwrap();

    let ids: Vec<&str> = result.test_cases.iter().map(|c| c.id.as_str()).collect();
    insta::assert_json_snapshot!(ids, @r#"
    [
      "VRF0001.s00001",
      "VRF0002.s00002",
      "VRF0003.s00003",
      "ATH0001.s00004",
      "ATH0002.s00005",
      "ATH0003.s00006"
    ]
    "#);

    insta::assert_json_snapshot!(result.stats, @r#"
    {
      "total_test_cases": 6,
      "sandbox_test_cases": 6,
      "production_test_cases": 6,
      "by_category": {
        "happy_path": 2,
        "unhappy_path": 2,
        "corner_case": 2
      },
      "combinations": 1,
      "recognized_features": 2
    }
    "#);
}

#[test]
fn zero_valid_columns_is_an_empty_result() {
    let matrix = RawMatrix::from_rows([
        vec!["Feature", "", ""],
        vec!["Provider", "#N/A", ""],
        vec!["Payment Method", "#N/A", "CARD"],
        vec!["Verify", "TRUE", "TRUE"],
    ]);
    let result = generator()
        .generate_from_matrix(
            &matrix,
            &MatrixLayout::default(),
            &GenerateOptions::default(),
            &mut RandomSuffix::seeded(1),
        )
        .unwrap();
    assert_eq!(result.stats.total_test_cases, 0);
    assert!(result.is_empty());
}

#[test]
fn malformed_matrix_is_reported() {
    let matrix = RawMatrix::from_rows([vec!["Feature"], vec!["Provider"]]);
    let err = generator()
        .generate_from_matrix(
            &matrix,
            &MatrixLayout::default(),
            &GenerateOptions::default(),
            &mut RandomSuffix::seeded(1),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Ingest(IngestError::MalformedInput { rows: 2 })
    ));
}

#[test]
fn columns_sharing_a_pair_share_sequences() {
    let matrix = RawMatrix::from_rows([
        vec!["Feature", "", "", ""],
        vec!["Provider", "REDE", "REDE", "Cielo"],
        vec!["Payment Method", "CARD", "CARD", "CARD"],
        vec!["Void", "TRUE", "TRUE", "TRUE"],
    ]);
    let result = generator()
        .generate_from_matrix(
            &matrix,
            &MatrixLayout::default(),
            &GenerateOptions::default(),
            &mut RandomSuffix::seeded(2),
        )
        .unwrap();
    let stable: Vec<&str> = result.test_cases.iter().map(TestCase::stable_id).collect();
    assert_eq!(
        stable,
        vec!["VOD0001", "VOD0002", "VOD0003", "VOD0004", "VOD0001", "VOD0002"]
    );
    assert_eq!(result.stats.combinations, 2);
}

#[test]
fn same_seed_same_ids() {
    let generate = |seed| {
        generator()
            .generate_from_matrix(
                &rede_matrix(),
                &MatrixLayout::default(),
                &GenerateOptions::default(),
                &mut RandomSuffix::seeded(seed),
            )
            .unwrap()
    };
    assert_eq!(generate(9), generate(9));
    assert_ne!(generate(9).test_cases, generate(10).test_cases);
}

#[test]
fn generator_is_shareable_across_threads() {
    let generator = generator();
    let matrix = rede_matrix();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let generator = &generator;
                let matrix = &matrix;
                scope.spawn(move || {
                    generator
                        .generate_from_matrix(
                            matrix,
                            &MatrixLayout::default(),
                            &GenerateOptions::default(),
                            &mut RandomSuffix::seeded(seed),
                        )
                        .map(|result| result.total())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 6);
        }
    });
}

const FEATURE_NAMES: [&str; 8] = [
    "Verify",
    "Authorize",
    "Refund",
    "3DS",
    "Webhooks",
    "Void",
    "Country",
    "Custom",
];

fn feature_set_strategy() -> impl Strategy<Value = FeatureSet> {
    let record = (0..FEATURE_NAMES.len(), prop_oneof![Just(""), Just("TRUE"), Just("NO")])
        .prop_map(|(i, value)| FeatureRecord::new(FEATURE_NAMES[i], value));
    let column = (
        prop_oneof![Just("REDE"), Just("Cielo"), Just("Stone")],
        prop_oneof![Just("CARD"), Just("PIX")],
        prop::collection::vec(record, 0..8),
    );
    prop::collection::vec(column, 0..5).prop_map(|columns| {
        let mut set = FeatureSet::default();
        for (index, (provider, method, records)) in columns.into_iter().enumerate() {
            set.push(
                scope_model::ColumnKey::new(provider, method, index + 1),
                records,
            );
        }
        set
    })
}

fn mode_strategy() -> impl Strategy<Value = EnvironmentMode> {
    prop_oneof![
        Just(EnvironmentMode::Separated),
        Just(EnvironmentMode::Sandbox),
        Just(EnvironmentMode::Production),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ids_are_unique(set in feature_set_strategy(), master in any::<bool>(), seed in any::<u64>()) {
        let options = GenerateOptions::default().with_master_rules(master);
        let result = generator()
            .generate_with(&set, &options, &mut RandomSuffix::seeded(seed))
            .unwrap();
        let mut seen = HashSet::new();
        for case in &result.test_cases {
            prop_assert!(seen.insert(case.id.clone()), "duplicate id {}", case.id);
        }
    }

    #[test]
    fn partition_law(set in feature_set_strategy(), seed in any::<u64>()) {
        let result = generator()
            .generate_with(&set, &GenerateOptions::default(), &mut RandomSuffix::seeded(seed))
            .unwrap();
        let stats = &result.stats;
        let has_both = result
            .test_cases
            .iter()
            .any(|c| c.environment == scope_model::Environment::Both);

        prop_assert!(stats.sandbox_test_cases + stats.production_test_cases >= stats.total_test_cases);
        prop_assert_eq!(
            stats.sandbox_test_cases + stats.production_test_cases == stats.total_test_cases,
            !has_both
        );
        for section in &result.sections {
            for case in &section.test_cases {
                prop_assert!(result.test_cases.contains(case));
            }
        }
    }

    #[test]
    fn total_matches_flattened_output(set in feature_set_strategy(), mode in mode_strategy()) {
        let options = GenerateOptions::new(Locale::english(), mode);
        let result = generator()
            .generate_with(&set, &options, &mut RandomSuffix::seeded(0))
            .unwrap();
        prop_assert_eq!(result.stats.total_test_cases, result.test_cases.len());
        if mode != EnvironmentMode::Separated {
            prop_assert_eq!(result.sections.len(), 1);
            prop_assert_eq!(&result.sections[0].test_cases, &result.test_cases);
        }
    }

    #[test]
    fn count_law_per_column(set in feature_set_strategy()) {
        let generator = generator();
        let result = generator
            .generate_with(&set, &GenerateOptions::default(), &mut RandomSuffix::seeded(0))
            .unwrap();
        let expected: usize = set
            .iter()
            .map(|entry| {
                entry
                    .features
                    .iter()
                    .map(|record| generator.catalog().templates_for(&record.feature_name).len())
                    .sum::<usize>()
            })
            .sum();
        prop_assert_eq!(result.total(), expected);

        let planned: usize = set
            .iter()
            .map(|entry| generator.planned_count(&entry.column, &set, FeatureGate::Catalog))
            .sum();
        prop_assert_eq!(planned, expected);
    }
}
