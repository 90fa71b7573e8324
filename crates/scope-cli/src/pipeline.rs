//! Command pipelines shared by the binary and its tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use scope_catalog::{EnvironmentPolicy, TemplateCatalog};
use scope_generate::{RandomSuffix, TestCaseGenerator};
use scope_ingest::{MatrixLayout, extract_matrix, read_matrix};
use scope_model::{EnvironmentTag, FeatureSet, GenerateOptions, GenerationResult};
use scope_report::{DocumentOptions, render_html, render_markdown};
use scope_rules::{IntegrationStep, RuleEnricher, RuleLoadWarning, RuleSummary};

/// Everything the generate command needs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub input: PathBuf,
    pub layout: MatrixLayout,
    pub options: GenerateOptions,
    /// Fixes identifier suffixes; entropy when `None`.
    pub seed: Option<u64>,
    pub rules_path: Option<PathBuf>,
    pub environments: BTreeMap<String, EnvironmentTag>,
}

/// Generation output plus the rule data that accompanies it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutcome {
    pub result: GenerationResult,
    pub integration_steps: Vec<IntegrationStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleSummary>,
    #[serde(skip)]
    pub rule_warnings: Vec<RuleLoadWarning>,
}

/// Document formats written by the generate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Markdown,
    Html,
}

/// Reads the matrix, loads rules, and generates test cases.
pub fn run_generate(request: &GenerateRequest) -> Result<GenerateOutcome> {
    let span = info_span!("generate", input = %request.input.display());
    let _guard = span.enter();

    let features = load_features(&request.input, &request.layout)?;

    let catalog = Arc::new(TemplateCatalog::embedded().context("load template catalog")?);
    let policy = EnvironmentPolicy::from_catalog(&catalog).with_overrides(
        request
            .environments
            .iter()
            .map(|(name, tag)| (name.as_str(), *tag)),
    );
    let generator = TestCaseGenerator::new(catalog).with_policy(policy);

    let (enricher, rule_warnings) = match &request.rules_path {
        Some(path) => RuleEnricher::from_path(path),
        None => (RuleEnricher::empty(), Vec::new()),
    };

    let result = match request.seed {
        Some(seed) => {
            generator.generate_with(&features, &request.options, &mut RandomSuffix::seeded(seed))
        }
        None => generator.generate_with(
            &features,
            &request.options,
            &mut RandomSuffix::from_entropy(),
        ),
    }
    .context("generate test cases")?;

    let integration_steps = enricher.integration_steps(
        result
            .test_cases
            .iter()
            .map(|case| case.feature_name.as_str()),
    );

    info!(
        test_cases = result.total(),
        combinations = result.stats.combinations,
        integration_steps = integration_steps.len(),
        "generation complete"
    );

    Ok(GenerateOutcome {
        result,
        integration_steps,
        rules: request
            .rules_path
            .as_ref()
            .map(|_| enricher.rules().summary()),
        rule_warnings,
    })
}

/// Reads a scoping CSV and extracts its valid columns and feature records.
pub fn load_features(path: &Path, layout: &MatrixLayout) -> Result<FeatureSet> {
    let matrix = read_matrix(path).with_context(|| format!("read {}", path.display()))?;
    extract_matrix(&matrix, layout)
        .with_context(|| format!("extract features from {}", path.display()))
}

/// Renders `outcome` in a document format.
pub fn render_document(
    outcome: &GenerateOutcome,
    format: DocumentFormat,
    merchant: Option<&str>,
) -> Result<String> {
    let mut options =
        DocumentOptions::default().with_integration_steps(outcome.integration_steps.clone());
    if let Some(name) = merchant {
        options.merchant_name = name.to_string();
    }

    match format {
        DocumentFormat::Json => {
            serde_json::to_string_pretty(outcome).context("serialize test cases")
        }
        DocumentFormat::Markdown => Ok(render_markdown(&outcome.result, &options)),
        DocumentFormat::Html => render_html(&outcome.result, &options).context("render HTML"),
    }
}
