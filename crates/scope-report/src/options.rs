//! Document rendering options.

use chrono::{DateTime, Utc};
use scope_rules::IntegrationStep;

/// Merchant name used when none is given.
pub const DEFAULT_MERCHANT: &str = "Merchant";

/// Timestamp layout of the "Generated on" line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options shared by the Markdown and HTML renderers.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Shown in the document title.
    pub merchant_name: String,
    /// Adds the metadata block and the closing summary.
    pub include_metadata: bool,
    /// Timestamp for the metadata block. `None` means the time of rendering.
    pub generated_at: Option<DateTime<Utc>>,
    /// Rendered as a numbered list after the test cases when non-empty.
    pub integration_steps: Vec<IntegrationStep>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            merchant_name: DEFAULT_MERCHANT.to_string(),
            include_metadata: true,
            generated_at: None,
            integration_steps: Vec::new(),
        }
    }
}

impl DocumentOptions {
    pub fn new(merchant_name: impl Into<String>) -> Self {
        Self {
            merchant_name: merchant_name.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn with_integration_steps(mut self, steps: Vec<IntegrationStep>) -> Self {
        self.integration_steps = steps;
        self
    }

    /// Blank names fall back to [`DEFAULT_MERCHANT`].
    pub fn merchant(&self) -> &str {
        let trimmed = self.merchant_name.trim();
        if trimmed.is_empty() {
            DEFAULT_MERCHANT
        } else {
            trimmed
        }
    }

    pub(crate) fn timestamp(&self) -> String {
        self.generated_at
            .unwrap_or_else(Utc::now)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    pub(crate) fn title(&self) -> String {
        format!("Implementation Test Cases for {}", self.merchant())
    }
}
