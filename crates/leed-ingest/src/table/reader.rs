//! CSV file reading into text-typed Polars frames.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

use super::header::{CsvHeaders, normalize_header};

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Spreadsheet exports occasionally arrive as UTF-16; those are rejected
/// up front rather than producing garbled column names.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads the header row of a CSV export.
///
/// Quoted names may contain commas, quotes and line breaks.
pub fn read_csv_schema(path: &Path) -> Result<CsvHeaders> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let record = reader.headers().map_err(|e| IngestError::CsvRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let columns: Vec<String> = record.iter().map(normalize_header).collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(CsvHeaders::new(columns))
}

/// Reads a CSV export into a DataFrame with every column typed as text.
///
/// Numeric parsing happens during cleaning so that a stray `n/a` in a
/// points column never changes the inferred schema of the whole file.
/// Column names are normalized to match the returned [`CsvHeaders`].
pub fn read_csv_table(path: &Path) -> Result<(DataFrame, CsvHeaders)> {
    validate_encoding(path)?;
    let headers = read_csv_schema(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() != headers.len() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "header has {} columns but {} were read",
                headers.len(),
                df.width()
            ),
        });
    }
    df.set_column_names(headers.columns.iter().map(String::as_str))?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "csv loaded"
    );

    Ok((df, headers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_schema_single_header() {
        let file = create_temp_csv(b"building_code,cat_code,type\nB1,EA,cat\n");
        let headers = read_csv_schema(file.path()).unwrap();
        assert_eq!(headers.columns, vec!["building_code", "cat_code", "type"]);
    }

    #[test]
    fn test_read_csv_schema_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_csv_schema(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_schema_with_bom() {
        let file = create_temp_csv("\u{feff}A,B,C\n1,2,3\n".as_bytes());
        let headers = read_csv_schema(file.path()).unwrap();
        assert_eq!(headers.columns, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_read_csv_schema_quoted_names() {
        let file = create_temp_csv(b"building_code,\"Points, awarded\",\"cat\ncode\"\nB1,5,EA\n");
        let headers = read_csv_schema(file.path()).unwrap();
        assert_eq!(
            headers.columns,
            vec!["building_code", "Points, awarded", "cat\ncode"]
        );
    }

    #[test]
    fn test_read_csv_table_renames_quoted_columns() {
        let file = create_temp_csv(b"\"Building Code \",\"Points, awarded\"\nB1,5\n");
        let (df, headers) = read_csv_table(file.path()).unwrap();
        assert_eq!(headers.columns, vec!["Building Code", "Points, awarded"]);
        assert_eq!(df.height(), 1);
        let points = df.column("Points, awarded").unwrap().str().unwrap();
        assert_eq!(points.get(0), Some("5"));
    }

    #[test]
    fn test_read_csv_schema_blank_header() {
        let file = create_temp_csv(b" , \n1,2\n");
        let result = read_csv_schema(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'A', 0x00]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_read_csv_table_keeps_points_as_text() {
        let file = create_temp_csv(b"building_code,awarded_points\nB1,5\nB2,n/a\n");
        let (df, headers) = read_csv_table(file.path()).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(df.height(), 2);
        let points = df.column("awarded_points").unwrap().str().unwrap();
        assert_eq!(points.get(0), Some("5"));
        assert_eq!(points.get(1), Some("n/a"));
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let result = read_csv_table(Path::new("/nonexistent/original_data.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
