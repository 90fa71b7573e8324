use thiserror::Error;

/// Errors raised while constructing model values from strings.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// Locale code is empty after trimming.
    #[error("invalid locale code '{0}'")]
    InvalidLocale(String),

    /// String does not name a known variant of an enumeration.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl ModelError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
