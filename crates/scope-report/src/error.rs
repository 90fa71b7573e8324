//! Error types for document rendering.

use thiserror::Error;

/// Failures while rendering a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// The XML writer could not emit an event.
    #[error("failed to write HTML: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to write HTML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The rendered bytes were not UTF-8.
    #[error("rendered HTML is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
