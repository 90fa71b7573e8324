//! CLI argument definitions for `scope-testgen`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use scope_cli::pipeline::DocumentFormat;
use scope_ingest::MatrixLayout;
use scope_model::{EnvironmentMode, FeatureGate};

#[derive(Parser)]
#[command(
    name = "scope-testgen",
    version,
    about = "Generate merchant test cases from an implementation scoping sheet",
    long_about = "Generate merchant test cases from an implementation scoping sheet.\n\n\
                  Reads the provider x payment method feature matrix, expands every\n\
                  recognized feature into catalog test cases, and writes them as a\n\
                  summary table, JSON, Markdown, or HTML."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate test cases from a scoping CSV.
    Generate(GenerateArgs),

    /// Show the valid columns of a scoping CSV and their feature records.
    Features(FeaturesArgs),

    /// Validate a feature rules file.
    Rules(RulesArgs),

    /// List catalog features and their test case templates.
    Catalog,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Scoping CSV exported from the implementation spreadsheet.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// TOML configuration file with defaults for the options below.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Feature rules JSON used for integration steps.
    #[arg(long = "rules", value_name = "JSON")]
    pub rules: Option<PathBuf>,

    /// Description language (en, es, pt).
    #[arg(long = "locale", value_name = "CODE")]
    pub locale: Option<String>,

    /// Environment view of the output.
    #[arg(long = "environment", value_enum)]
    pub environment: Option<EnvironmentArg>,

    /// Which feature records produce test cases.
    #[arg(long = "feature-gate", value_enum)]
    pub feature_gate: Option<FeatureGateArg>,

    /// Emit the merchant-wide master test cases first.
    #[arg(
        long = "master-rules",
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub master_rules: Option<bool>,

    /// Seed for identifier suffixes (reproducible output).
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Where feature names and feature rows sit in the CSV.
    #[arg(long = "layout", value_enum, default_value = "default")]
    pub layout: LayoutArg,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Write the document to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Merchant name for document titles.
    #[arg(long = "merchant", value_name = "NAME")]
    pub merchant: Option<String>,
}

#[derive(Parser)]
pub struct FeaturesArgs {
    /// Scoping CSV exported from the implementation spreadsheet.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Where feature names and feature rows sit in the CSV.
    #[arg(long = "layout", value_enum, default_value = "default")]
    pub layout: LayoutArg,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Feature rules JSON file.
    #[arg(value_name = "JSON")]
    pub path: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EnvironmentArg {
    Separated,
    Sandbox,
    Production,
}

impl From<EnvironmentArg> for EnvironmentMode {
    fn from(value: EnvironmentArg) -> Self {
        match value {
            EnvironmentArg::Separated => EnvironmentMode::Separated,
            EnvironmentArg::Sandbox => EnvironmentMode::Sandbox,
            EnvironmentArg::Production => EnvironmentMode::Production,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FeatureGateArg {
    /// Every feature with catalog templates.
    Catalog,
    /// Only features whose value marks them implemented.
    Implemented,
}

impl From<FeatureGateArg> for FeatureGate {
    fn from(value: FeatureGateArg) -> Self {
        match value {
            FeatureGateArg::Catalog => FeatureGate::Catalog,
            FeatureGateArg::Implemented => FeatureGate::Implemented,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// Feature names in the first column.
    Default,
    /// Exported scoping spreadsheet: feature names in the second column.
    ScopingSheet,
}

impl From<LayoutArg> for MatrixLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Default => MatrixLayout::default(),
            LayoutArg::ScopingSheet => MatrixLayout::scoping_sheet(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
    Markdown,
    Html,
}

impl OutputFormatArg {
    /// `None` for the terminal summary table.
    pub fn document(self) -> Option<DocumentFormat> {
        match self {
            OutputFormatArg::Table => None,
            OutputFormatArg::Json => Some(DocumentFormat::Json),
            OutputFormatArg::Markdown => Some(DocumentFormat::Markdown),
            OutputFormatArg::Html => Some(DocumentFormat::Html),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
