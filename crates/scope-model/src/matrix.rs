use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel marking an absent provider or payment method in the header rows.
pub const NOT_AVAILABLE: &str = "#N/A";

/// Tabular scoping document as handed over by the CSV reader.
///
/// Row 0 holds informational labels, row 1 the provider per column, row 2
/// the payment method per column, and the remaining rows are feature rows.
/// Rows may have different lengths; a missing cell reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatrix {
    rows: Vec<Vec<String>>,
}

impl RawMatrix {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a matrix from anything string-like, mostly for fixtures.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell.as_ref().to_string()).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell at `(row, column)`, or `""` when either index is out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl From<Vec<Vec<String>>> for RawMatrix {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

/// A usable provider + payment method column.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ColumnKey {
    pub provider: String,
    pub payment_method: String,
    pub column_index: usize,
}

impl ColumnKey {
    pub fn new(
        provider: impl Into<String>,
        payment_method: impl Into<String>,
        column_index: usize,
    ) -> Self {
        Self {
            provider: provider.into(),
            payment_method: payment_method.into(),
            column_index,
        }
    }

    /// Identity used for sequence numbering; columns sharing a provider and
    /// payment method share one group.
    pub fn group(&self) -> (&str, &str) {
        (&self.provider, &self.payment_method)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.provider, self.payment_method)
    }
}
