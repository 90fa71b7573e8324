//! Test case generation pipeline.

use std::sync::Arc;

use scope_catalog::{EnvironmentPolicy, LocaleTable, TemplateCatalog};
use scope_ingest::{MatrixLayout, extract_matrix};
use scope_model::{
    ColumnKey, EnvironmentMode, FeatureGate, FeatureRecord, FeatureSet, GenerateOptions,
    GenerationResult, Locale, MASTER_PAYMENT_METHOD, MASTER_PROVIDER, RawMatrix, TestCase,
    TestCaseTemplate,
};
use tracing::{debug, info_span, trace};

use crate::error::{GenerateError, Result};
use crate::ids::{IdGenerator, RandomSuffix, SequenceTracker, SuffixSource};
use crate::partition::partition;

/// One case to emit, before its id and description are resolved.
struct Planned<'a> {
    template: &'a TestCaseTemplate,
    provider: &'a str,
    payment_method: &'a str,
}

/// Orchestrates catalog lookup, id issuing, and environment partitioning.
///
/// The generator holds only read-only data and can be shared between
/// threads; each call brings its own suffix source.
#[derive(Debug, Clone)]
pub struct TestCaseGenerator {
    catalog: Arc<TemplateCatalog>,
    policy: EnvironmentPolicy,
}

impl TestCaseGenerator {
    /// Generator over `catalog` with the catalog's default environment tags.
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        let policy = EnvironmentPolicy::from_catalog(&catalog);
        Self { catalog, policy }
    }

    /// Generator over the embedded catalog.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(Arc::new(TemplateCatalog::embedded()?)))
    }

    pub fn with_policy(mut self, policy: EnvironmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> &EnvironmentPolicy {
        &self.policy
    }

    /// Generates with default options and entropy-seeded suffixes.
    pub fn generate(
        &self,
        features: &FeatureSet,
        mode: EnvironmentMode,
        locale: &Locale,
    ) -> Result<GenerationResult> {
        let options = GenerateOptions::new(locale.clone(), mode);
        self.generate_with(features, &options, &mut RandomSuffix::from_entropy())
    }

    /// Validates and extracts `matrix`, then generates.
    pub fn generate_from_matrix<S>(
        &self,
        matrix: &RawMatrix,
        layout: &MatrixLayout,
        options: &GenerateOptions,
        suffixes: &mut S,
    ) -> Result<GenerationResult>
    where
        S: SuffixSource + ?Sized,
    {
        let features = extract_matrix(matrix, layout)?;
        self.generate_with(&features, options, suffixes)
    }

    /// Full pipeline: for each column in order, each feature record with a
    /// catalog entry, and each of its templates in order, emit one case.
    ///
    /// Descriptions are resolved before any id is issued, so a locale
    /// problem never yields a partial result.
    pub fn generate_with<S>(
        &self,
        features: &FeatureSet,
        options: &GenerateOptions,
        suffixes: &mut S,
    ) -> Result<GenerationResult>
    where
        S: SuffixSource + ?Sized,
    {
        let span = info_span!(
            "generate",
            locale = %options.locale,
            mode = %options.environment_mode,
            columns = features.len()
        );
        let _guard = span.enter();

        let table = self.catalog.locale_table(&options.locale)?;

        let mut planned = Vec::new();
        if options.include_master_rules {
            planned.extend(
                self.catalog
                    .master_templates()
                    .iter()
                    .map(|template| Planned {
                        template,
                        provider: MASTER_PROVIDER,
                        payment_method: MASTER_PAYMENT_METHOD,
                    }),
            );
        }

        let mut recognized_features = 0;
        for entry in features {
            for record in &entry.features {
                let templates = self.templates_for(record, options.feature_gate);
                if templates.is_empty() {
                    continue;
                }
                recognized_features += 1;
                planned.extend(templates.iter().map(|template| Planned {
                    template,
                    provider: &entry.column.provider,
                    payment_method: &entry.column.payment_method,
                }));
            }
        }

        let descriptions = describe_all(&planned, table)?;

        let mut sequences = SequenceTracker::new();
        let mut ids = IdGenerator::new(suffixes);
        let mut cases = Vec::with_capacity(planned.len());
        for (plan, description) in planned.iter().zip(descriptions) {
            let template = plan.template;
            let sequence =
                sequences.next(plan.provider, plan.payment_method, &template.code_prefix);
            cases.push(TestCase {
                id: ids.next_id(&template.code_prefix, sequence)?,
                provider: plan.provider.to_string(),
                payment_method: plan.payment_method.to_string(),
                feature_name: template.feature_name.clone(),
                category: template.category,
                description: description.to_string(),
                environment: self.policy.tag_for(&template.feature_name).environment(),
            });
        }

        debug!(
            generated = cases.len(),
            recognized_features, "generated test cases"
        );

        let mut result = partition(cases, options.environment_mode, options.locale.clone());
        result.stats.recognized_features = recognized_features;
        Ok(result)
    }

    /// Templates a record produces under `gate`.
    fn templates_for(&self, record: &FeatureRecord, gate: FeatureGate) -> &[TestCaseTemplate] {
        let templates = self.catalog.templates_for(&record.feature_name);
        if templates.is_empty() {
            trace!(feature = %record.feature_name, "no catalog entry");
            return &[];
        }
        match gate {
            FeatureGate::Catalog => templates,
            FeatureGate::Implemented if record.is_implemented() => templates,
            FeatureGate::Implemented => {
                trace!(
                    feature = %record.feature_name,
                    value = %record.value,
                    "feature not marked implemented"
                );
                &[]
            }
        }
    }

    /// Number of cases `column` contributes under `gate`: the template
    /// counts of its recognized features, summed.
    pub fn planned_count(
        &self,
        column: &ColumnKey,
        features: &FeatureSet,
        gate: FeatureGate,
    ) -> usize {
        features.get(column).map_or(0, |records| {
            records
                .iter()
                .map(|record| self.templates_for(record, gate).len())
                .sum()
        })
    }
}

fn describe_all<'a>(planned: &[Planned<'_>], table: &'a LocaleTable) -> Result<Vec<&'a str>> {
    planned
        .iter()
        .map(|plan| {
            table
                .require(&plan.template.description_key)
                .map_err(GenerateError::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_model::{Category, Environment};

    fn generator() -> TestCaseGenerator {
        TestCaseGenerator::embedded().unwrap()
    }

    fn features(rows: &[(&str, &str)]) -> FeatureSet {
        let mut set = FeatureSet::default();
        set.push(
            ColumnKey::new("REDE", "CARD", 1),
            rows.iter()
                .map(|(name, value)| FeatureRecord::new(*name, *value))
                .collect(),
        );
        set
    }

    #[test]
    fn unknown_features_are_skipped() {
        let generator = generator();
        let set = features(&[("Country", "Brazil"), ("Verify", "TRUE")]);
        let mut suffixes = RandomSuffix::seeded(1);
        let result = generator
            .generate_with(&set, &GenerateOptions::default(), &mut suffixes)
            .unwrap();
        assert_eq!(result.total(), 3);
        assert!(result.test_cases.iter().all(|c| c.feature_name == "Verify"));
        assert_eq!(result.stats.recognized_features, 1);
    }

    #[test]
    fn implemented_gate_requires_marker() {
        let generator = generator();
        let set = features(&[("Verify", "FALSE"), ("Authorize", "yes"), ("Refund", "")]);
        let options = GenerateOptions::default().with_feature_gate(FeatureGate::Implemented);
        let result = generator
            .generate_with(&set, &options, &mut RandomSuffix::seeded(1))
            .unwrap();
        let stable: Vec<&str> = result.test_cases.iter().map(TestCase::stable_id).collect();
        assert_eq!(stable, vec!["ATH0001", "ATH0002", "ATH0003"]);
    }

    #[test]
    fn catalog_gate_ignores_value() {
        let generator = generator();
        let set = features(&[("Verify", "")]);
        let result = generator
            .generate_with(&set, &GenerateOptions::default(), &mut RandomSuffix::seeded(1))
            .unwrap();
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn master_rules_come_first() {
        let generator = generator();
        let set = features(&[("Verify", "TRUE")]);
        let options = GenerateOptions::default().with_master_rules(true);
        let result = generator
            .generate_with(&set, &options, &mut RandomSuffix::seeded(3))
            .unwrap();

        assert_eq!(result.total(), 8);
        let master: Vec<&TestCase> = result.test_cases.iter().take(5).collect();
        assert!(master.iter().all(|c| c.is_master()));
        assert_eq!(master[0].stable_id(), "MST0001");
        assert_eq!(master[4].stable_id(), "MST0005");
        assert_eq!(result.stats.combinations, 1);
        assert_eq!(result.stats.recognized_features, 1);
    }

    #[test]
    fn master_rules_without_features() {
        let generator = generator();
        let options = GenerateOptions::default().with_master_rules(true);
        let result = generator
            .generate_with(&FeatureSet::default(), &options, &mut RandomSuffix::seeded(3))
            .unwrap();
        assert_eq!(result.total(), 5);
        assert_eq!(result.sandbox().map(<[TestCase]>::len), Some(5));
        assert_eq!(result.production().map(<[TestCase]>::len), Some(5));
    }

    #[test]
    fn environment_tags_come_from_policy() {
        let generator = generator();
        let set = features(&[("3DS", "TRUE"), ("Webhooks", "TRUE")]);
        let result = generator
            .generate_with(&set, &GenerateOptions::default(), &mut RandomSuffix::seeded(5))
            .unwrap();
        let sandbox = result.sandbox().unwrap();
        let production = result.production().unwrap();
        assert!(sandbox.iter().all(|c| c.feature_name == "3DS"));
        assert!(production.iter().all(|c| c.feature_name == "Webhooks"));
        assert_eq!(
            result.stats.sandbox_test_cases + result.stats.production_test_cases,
            result.stats.total_test_cases
        );

        let overridden = generator.clone().with_policy(
            EnvironmentPolicy::from_catalog(generator.catalog())
                .with_override("3DS", scope_model::EnvironmentTag::Both),
        );
        let result = overridden
            .generate_with(&set, &GenerateOptions::default(), &mut RandomSuffix::seeded(5))
            .unwrap();
        assert!(
            result
                .test_cases
                .iter()
                .filter(|c| c.feature_name == "3DS")
                .all(|c| c.environment == Environment::Both)
        );
    }

    #[test]
    fn unsupported_locale_fails_without_output() {
        let generator = generator();
        let set = features(&[("Verify", "TRUE")]);
        let options = GenerateOptions::new(Locale::new("fr").unwrap(), EnvironmentMode::Separated);
        let err = generator
            .generate_with(&set, &options, &mut RandomSuffix::seeded(1))
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedLocale { ref locale, .. } if locale == "fr"));
    }

    #[test]
    fn spanish_descriptions() {
        let generator = generator();
        let set = features(&[("Verify", "TRUE")]);
        let options = GenerateOptions::new(Locale::new("es").unwrap(), EnvironmentMode::Sandbox);
        let result = generator
            .generate_with(&set, &options, &mut RandomSuffix::seeded(1))
            .unwrap();
        assert_eq!(result.locale.as_str(), "es");
        assert!(result.test_cases[0].description.starts_with("Verificar"));
        assert_eq!(result.test_cases[0].category, Category::HappyPath);
    }

    #[test]
    fn planned_count_matches_templates() {
        let generator = generator();
        let set = features(&[("Verify", "TRUE"), ("Void", "TRUE"), ("Custom", "TRUE")]);
        let column = ColumnKey::new("REDE", "CARD", 1);
        assert_eq!(generator.planned_count(&column, &set, FeatureGate::Catalog), 5);
    }
}
