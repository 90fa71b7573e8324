//! Where feature names and feature rows sit inside a scoping matrix.

use serde::{Deserialize, Serialize};

/// Row index of the provider header.
pub const PROVIDER_ROW: usize = 1;

/// Row index of the payment method header.
pub const PAYMENT_METHOD_ROW: usize = 2;

/// Number of header rows every matrix must carry.
pub const HEADER_ROWS: usize = 3;

/// Position of the feature-name column and of the first feature row.
///
/// Columns at or left of `feature_name_column` hold labels and are never
/// treated as provider + payment method columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixLayout {
    pub feature_name_column: usize,
    pub first_feature_row: usize,
}

impl MatrixLayout {
    pub const fn new(feature_name_column: usize, first_feature_row: usize) -> Self {
        Self {
            feature_name_column,
            first_feature_row,
        }
    }

    /// Layout of the exported scoping spreadsheet: column 0 is blank, column 1
    /// carries the header labels and feature names, and row 3 is a sub-header
    /// (`Feature Details, INFORMATION, STATUS, ...`). Feature rows start at
    /// row 4 whatever the sub-header holds.
    pub const fn scoping_sheet() -> Self {
        Self::new(1, HEADER_ROWS + 1)
    }

    /// First column that may hold a provider + payment method pair.
    pub const fn first_data_column(&self) -> usize {
        self.feature_name_column + 1
    }
}

impl Default for MatrixLayout {
    fn default() -> Self {
        Self::new(0, HEADER_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts() {
        assert_eq!(MatrixLayout::default().first_data_column(), 1);
        assert_eq!(MatrixLayout::scoping_sheet().first_data_column(), 2);
        assert_eq!(MatrixLayout::scoping_sheet().first_feature_row, 4);
    }
}
