//! CSV reading for scoping matrices.

use std::io::Read;
use std::path::Path;

use scope_model::RawMatrix;

use crate::error::{IngestError, Result};

const IN_MEMORY: &str = "<memory>";

fn records_from<R: Read>(reader: R, origin: &str) -> Result<RawMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestError::CsvParse {
            origin: origin.to_string(),
            source: e,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawMatrix::new(rows))
}

/// Parses CSV text into a matrix. Rows may differ in length; a leading
/// UTF-8 BOM is dropped.
pub fn parse_matrix(text: &str) -> Result<RawMatrix> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    records_from(text.as_bytes(), IN_MEMORY)
}

/// Reads a CSV file into a matrix.
pub fn read_matrix(path: &Path) -> Result<RawMatrix> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let content = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);
    let matrix = records_from(content, &path.display().to_string())?;

    tracing::debug!(
        path = %path.display(),
        rows = matrix.row_count(),
        width = matrix.width(),
        "read scoping matrix"
    );

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_flexible_rows() {
        let matrix = parse_matrix("a,b,c\nd\n\"e,f\",g\n").unwrap();
        assert_eq!(matrix.row_count(), 3);
        assert_eq!(matrix.cell(0, 2), "c");
        assert_eq!(matrix.cell(1, 1), "");
        assert_eq!(matrix.cell(2, 0), "e,f");
    }

    #[test]
    fn test_parse_strips_bom() {
        let matrix = parse_matrix("\u{feff}Feature,REDE\n").unwrap();
        assert_eq!(matrix.cell(0, 0), "Feature");
    }

    #[test]
    fn test_read_matrix_from_file() {
        let file = create_temp_csv("\u{feff},x\n,REDE\n,CARD\nVerify,TRUE\n");
        let matrix = read_matrix(file.path()).unwrap();
        assert_eq!(matrix.row_count(), 4);
        assert_eq!(matrix.cell(0, 0), "");
        assert_eq!(matrix.cell(3, 1), "TRUE");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_matrix(Path::new("/nonexistent/scoping.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
