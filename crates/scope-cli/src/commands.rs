use anyhow::{Context, Result, bail};
use tracing::info;

use scope_catalog::{EnvironmentPolicy, TemplateCatalog};
use scope_cli::config::{ConfigFile, GenerateOverrides, resolve};
use scope_cli::pipeline::{GenerateRequest, load_features, render_document, run_generate};
use scope_model::Locale;
use scope_rules::validate_rules_file;

use crate::cli::{FeaturesArgs, GenerateArgs, RulesArgs};
use crate::summary::{print_catalog, print_features, print_generation_summary, print_rule_report};

pub fn run_generate_command(args: &GenerateArgs) -> Result<()> {
    let format = args.format.document();
    if format.is_none() && args.output.is_some() {
        bail!("--output needs a document format (--format json, markdown, or html)");
    }

    let file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let locale = args
        .locale
        .as_deref()
        .map(Locale::new)
        .transpose()
        .context("invalid --locale")?;
    let settings = resolve(
        &file,
        GenerateOverrides {
            locale,
            environment: args.environment.map(Into::into),
            feature_gate: args.feature_gate.map(Into::into),
            include_master_rules: args.master_rules,
            seed: args.seed,
            rules_path: args.rules.clone(),
        },
    );

    let request = GenerateRequest {
        input: args.input.clone(),
        layout: args.layout.into(),
        options: settings.options,
        seed: settings.seed,
        rules_path: settings.rules_path,
        environments: settings.environments,
    };
    let outcome = run_generate(&request)?;

    let Some(format) = format else {
        print_generation_summary(&outcome);
        return Ok(());
    };

    let document = render_document(&outcome, format, args.merchant.as_deref())?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, document).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote document");
            println!(
                "Wrote {} test cases to {}",
                outcome.result.total(),
                path.display()
            );
        }
        None => println!("{document}"),
    }
    Ok(())
}

pub fn run_features(args: &FeaturesArgs) -> Result<()> {
    let features = load_features(&args.input, &args.layout.into())?;
    print_features(&features);
    Ok(())
}

/// Prints the validation report; `Ok(false)` when the file is invalid.
pub fn run_rules(args: &RulesArgs) -> Result<bool> {
    let report = validate_rules_file(&args.path);
    print_rule_report(&report);
    Ok(report.is_valid)
}

pub fn run_catalog() -> Result<()> {
    let catalog = TemplateCatalog::embedded().context("load template catalog")?;
    let policy = EnvironmentPolicy::from_catalog(&catalog);
    print_catalog(&catalog, &policy);
    Ok(())
}
