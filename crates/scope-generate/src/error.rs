//! Error types for test case generation.

use scope_catalog::CatalogError;
use scope_ingest::IngestError;
use thiserror::Error;

/// Errors that abort a generation call. No partial result is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The locale has no table, or lacks a description a template needs.
    #[error("unsupported locale '{locale}': {reason}")]
    UnsupportedLocale { locale: String, reason: String },

    /// The scoping matrix could not be turned into feature records.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The template catalog could not be built.
    #[error("template catalog: {0}")]
    Catalog(#[source] CatalogError),

    /// Every suffix drawn for an identifier collided with one already issued.
    #[error("could not issue a unique id for {prefix}{sequence:04} after {attempts} attempts")]
    IdExhausted {
        prefix: String,
        sequence: u32,
        attempts: usize,
    },

    /// A group produced more cases for one prefix than four digits can number.
    #[error("sequence {sequence} for {prefix} does not fit the four-digit id field")]
    SequenceOutOfRange { prefix: String, sequence: u32 },
}

impl From<CatalogError> for GenerateError {
    fn from(err: CatalogError) -> Self {
        match err.locale() {
            Some(locale) => Self::UnsupportedLocale {
                locale: locale.to_string(),
                reason: err.to_string(),
            },
            None => Self::Catalog(err),
        }
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
