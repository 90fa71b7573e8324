//! Error types for scoping matrix ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or interpreting a scoping matrix.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === Matrix Shape Errors ===
    /// Fewer than the three header rows (labels, providers, payment methods).
    #[error("malformed scoping matrix: expected at least 3 rows, found {rows}")]
    MalformedInput { rows: usize },

    /// Header rows are present but no feature row follows them.
    #[error("scoping matrix has no feature rows ({rows} rows in total)")]
    NoFeatureData { rows: usize },

    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The csv reader rejected the input.
    #[error("failed to parse CSV {origin}: {source}")]
    CsvParse {
        origin: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/scoping.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/scoping.csv");

        let err = IngestError::MalformedInput { rows: 2 };
        assert_eq!(
            err.to_string(),
            "malformed scoping matrix: expected at least 3 rows, found 2"
        );
    }
}
