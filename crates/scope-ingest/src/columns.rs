//! Provider + payment method column detection.

use scope_model::{ColumnKey, NOT_AVAILABLE, RawMatrix};

use crate::error::{IngestError, Result};
use crate::layout::{HEADER_ROWS, MatrixLayout, PAYMENT_METHOD_ROW, PROVIDER_ROW};

/// Returns true when a header cell names a real provider or payment method.
pub fn is_present(cell: &str) -> bool {
    let trimmed = cell.trim();
    !trimmed.is_empty() && trimmed != NOT_AVAILABLE
}

/// Valid columns of `matrix` under the default layout.
pub fn identify_valid_columns(matrix: &RawMatrix) -> Result<Vec<ColumnKey>> {
    identify_valid_columns_with(matrix, &MatrixLayout::default())
}

/// Valid columns of `matrix`, in column order.
///
/// Only the provider and payment method rows are consulted. Values are
/// stored trimmed.
pub fn identify_valid_columns_with(
    matrix: &RawMatrix,
    layout: &MatrixLayout,
) -> Result<Vec<ColumnKey>> {
    let rows = matrix.row_count();
    if rows < HEADER_ROWS {
        return Err(IngestError::MalformedInput { rows });
    }

    let header_width = [PROVIDER_ROW, PAYMENT_METHOD_ROW]
        .iter()
        .filter_map(|&index| matrix.row(index).map(<[String]>::len))
        .max()
        .unwrap_or(0);

    let columns: Vec<ColumnKey> = (layout.first_data_column()..header_width)
        .filter_map(|index| {
            let provider = matrix.cell(PROVIDER_ROW, index);
            let payment_method = matrix.cell(PAYMENT_METHOD_ROW, index);
            (is_present(provider) && is_present(payment_method))
                .then(|| ColumnKey::new(provider.trim(), payment_method.trim(), index))
        })
        .collect();

    tracing::debug!(
        header_width,
        valid_columns = columns.len(),
        "identified provider columns"
    );

    Ok(columns)
}
