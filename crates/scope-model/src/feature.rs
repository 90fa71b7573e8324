//! Feature records extracted per valid column.

use serde::{Deserialize, Serialize};

use crate::matrix::ColumnKey;

/// Values that mark a feature as implemented (compared trimmed, case-insensitive).
pub const IMPLEMENTED_MARKERS: [&str; 7] = [
    "TRUE",
    "IMPLEMENTED",
    "YES",
    "Y",
    "1",
    "SUPPORTED",
    "AVAILABLE",
];

/// One feature row read for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub feature_name: String,
    /// Cell content, verbatim.
    pub value: String,
    /// True iff `value` is non-empty after trimming.
    pub has_value: bool,
}

impl FeatureRecord {
    pub fn new(feature_name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let has_value = !value.trim().is_empty();
        Self {
            feature_name: feature_name.into(),
            value,
            has_value,
        }
    }

    pub fn is_implemented(&self) -> bool {
        let value = self.value.trim();
        IMPLEMENTED_MARKERS
            .iter()
            .any(|marker| marker.eq_ignore_ascii_case(value))
    }
}

/// Feature records of a single column, in feature-row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFeatures {
    pub column: ColumnKey,
    pub features: Vec<FeatureRecord>,
}

/// Extraction result: valid columns in original order, each with its records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    columns: Vec<ColumnFeatures>,
}

impl FeatureSet {
    pub fn new(columns: Vec<ColumnFeatures>) -> Self {
        Self { columns }
    }

    pub fn push(&mut self, column: ColumnKey, features: Vec<FeatureRecord>) {
        self.columns.push(ColumnFeatures { column, features });
    }

    pub fn columns(&self) -> &[ColumnFeatures] {
        &self.columns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnFeatures> {
        self.columns.iter()
    }

    pub fn get(&self, column: &ColumnKey) -> Option<&[FeatureRecord]> {
        self.columns
            .iter()
            .find(|entry| &entry.column == column)
            .map(|entry| entry.features.as_slice())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a ColumnFeatures;
    type IntoIter = std::slice::Iter<'a, ColumnFeatures>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// A feature record plus the documentation metadata of its rule, if any.
///
/// `has_rule == false` implies both metadata fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedFeature {
    #[serde(flatten)]
    pub record: FeatureRecord,
    pub documentation_url: Option<String>,
    pub comment: Option<String>,
    pub has_rule: bool,
}

impl EnrichedFeature {
    pub fn without_rule(record: FeatureRecord) -> Self {
        Self {
            record,
            documentation_url: None,
            comment: None,
            has_rule: false,
        }
    }

    pub fn with_rule(
        record: FeatureRecord,
        documentation_url: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            record,
            documentation_url: Some(documentation_url.into()),
            comment: Some(comment.into()),
            has_rule: true,
        }
    }
}
