//! Feature record extraction for valid columns.

use scope_model::{ColumnKey, FeatureRecord, FeatureSet, RawMatrix};

use crate::columns::identify_valid_columns_with;
use crate::error::{IngestError, Result};
use crate::layout::{HEADER_ROWS, MatrixLayout};

/// Feature rows of `matrix` as `(row index, trimmed feature name)`, skipping
/// rows whose feature-name cell is blank.
fn feature_rows<'a>(
    matrix: &'a RawMatrix,
    layout: &MatrixLayout,
) -> impl Iterator<Item = (usize, &'a str)> {
    let name_column = layout.feature_name_column;
    (first_feature_row(layout)..matrix.row_count()).filter_map(move |row| {
        let name = matrix.cell(row, name_column).trim();
        (!name.is_empty()).then_some((row, name))
    })
}

fn first_feature_row(layout: &MatrixLayout) -> usize {
    layout.first_feature_row.max(HEADER_ROWS)
}

/// Feature records for each of `columns` under the default layout.
pub fn extract_features(matrix: &RawMatrix, columns: &[ColumnKey]) -> Result<FeatureSet> {
    extract_features_with(matrix, columns, &MatrixLayout::default())
}

/// Feature records for each of `columns`, in column then feature-row order.
///
/// Values are stored verbatim. Zero columns yields an empty set; a matrix
/// without any feature row is an error.
pub fn extract_features_with(
    matrix: &RawMatrix,
    columns: &[ColumnKey],
    layout: &MatrixLayout,
) -> Result<FeatureSet> {
    let rows = matrix.row_count();
    if rows < HEADER_ROWS {
        return Err(IngestError::MalformedInput { rows });
    }
    if rows <= first_feature_row(layout) {
        return Err(IngestError::NoFeatureData { rows });
    }

    let named_rows: Vec<(usize, &str)> = feature_rows(matrix, layout).collect();

    let mut set = FeatureSet::default();
    for column in columns {
        let records = named_rows
            .iter()
            .map(|&(row, name)| FeatureRecord::new(name, matrix.cell(row, column.column_index)))
            .collect();
        set.push(column.clone(), records);
    }

    tracing::debug!(
        columns = set.len(),
        feature_rows = named_rows.len(),
        "extracted feature records"
    );

    Ok(set)
}

/// Validates columns and extracts their features in one pass.
pub fn extract_matrix(matrix: &RawMatrix, layout: &MatrixLayout) -> Result<FeatureSet> {
    let columns = identify_valid_columns_with(matrix, layout)?;
    extract_features_with(matrix, &columns, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::identify_valid_columns;

    fn matrix() -> RawMatrix {
        RawMatrix::from_rows([
            vec!["Feature", "", ""],
            vec!["Provider", "REDE", "#N/A"],
            vec!["Payment Method", "CARD", "#N/A"],
            vec!["Verify", "TRUE", "TRUE"],
            vec!["", "ignored", "ignored"],
            vec![" Authorize ", "  ", "x"],
            vec!["Country"],
        ])
    }

    #[test]
    fn test_records_follow_feature_rows() {
        let matrix = matrix();
        let columns = identify_valid_columns(&matrix).unwrap();
        let set = extract_features(&matrix, &columns).unwrap();

        assert_eq!(set.len(), 1);
        let records = set.get(&ColumnKey::new("REDE", "CARD", 1)).unwrap();
        assert_eq!(
            records,
            &[
                FeatureRecord::new("Verify", "TRUE"),
                FeatureRecord::new("Authorize", "  "),
                FeatureRecord::new("Country", ""),
            ]
        );
        assert!(!records[1].has_value);
    }

    #[test]
    fn test_no_feature_rows() {
        let matrix = RawMatrix::from_rows([
            vec!["", "x"],
            vec!["", "REDE"],
            vec!["", "CARD"],
        ]);
        let columns = identify_valid_columns(&matrix).unwrap();
        assert!(matches!(
            extract_features(&matrix, &columns),
            Err(IngestError::NoFeatureData { rows: 3 })
        ));
    }

    #[test]
    fn test_zero_columns_is_empty_not_error() {
        let set = extract_features(&matrix(), &[]).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_scoping_sheet_skips_sub_header() {
        let matrix = RawMatrix::from_rows([
            vec!["", "", "Merchant"],
            vec!["", "Provider", "REDE"],
            vec!["", "Payment_Method", "CARD"],
            vec!["", "", "INFORMATION"],
            vec!["", "Verify", "TRUE"],
        ]);
        let set = extract_matrix(&matrix, &MatrixLayout::scoping_sheet()).unwrap();
        let records = set.get(&ColumnKey::new("REDE", "CARD", 2)).unwrap();
        assert_eq!(records, &[FeatureRecord::new("Verify", "TRUE")]);
    }

    #[test]
    fn test_scoping_sheet_skips_labelled_sub_header() {
        let matrix = RawMatrix::from_rows([
            vec!["", "Feature", "ACME"],
            vec!["", "Provider", "REDE"],
            vec!["", "Payment_Method", "CARD"],
            vec!["", "Feature Details", "INFORMATION"],
            vec!["", "Verify", "TRUE"],
        ]);
        let set = extract_matrix(&matrix, &MatrixLayout::scoping_sheet()).unwrap();
        let records = set.get(&ColumnKey::new("REDE", "CARD", 2)).unwrap();
        assert_eq!(records, &[FeatureRecord::new("Verify", "TRUE")]);
    }

    #[test]
    fn test_scoping_sheet_without_feature_rows() {
        let matrix = RawMatrix::from_rows([
            vec!["", "Feature", "ACME"],
            vec!["", "Provider", "REDE"],
            vec!["", "Payment_Method", "CARD"],
            vec!["", "Feature Details", "INFORMATION"],
        ]);
        assert!(matches!(
            extract_matrix(&matrix, &MatrixLayout::scoping_sheet()),
            Err(IngestError::NoFeatureData { rows: 4 })
        ));
    }
}
