use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Language code used to resolve test case descriptions (`en`, `es`, `pt`).
///
/// Codes are normalized to trimmed lowercase. Whether a locale is actually
/// supported is decided by the catalog at generation time.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub const DEFAULT: &'static str = "en";

    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ModelError::InvalidLocale(value));
        }
        Ok(Self(normalized))
    }

    pub fn english() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}
