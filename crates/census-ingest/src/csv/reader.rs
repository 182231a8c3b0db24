//! CSV file reading.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use census_model::RawTable;
use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::frame::dataframe_to_table;

use super::header::{fill_blank_headers, parse_csv_line, unnamed_header};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
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

    // UTF-8 BOM is acceptable (stripped from the header row)
    Ok(())
}

/// Reads the first line of a file, without its BOM.
fn read_first_line(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let reader = BufReader::new(file);

    match reader.lines().next() {
        Some(line) => {
            let line = line.map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(
                line.strip_prefix('\u{feff}').unwrap_or(&line).to_string(),
            ))
        }
        None => Ok(None),
    }
}

/// Parses the header row as written, blank cells included.
fn read_raw_headers(path: &Path) -> Result<Vec<String>> {
    validate_encoding(path)?;
    let line = read_first_line(path)?.ok_or_else(|| IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })?;

    let columns = parse_csv_line(&line);
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    Ok(columns)
}

/// Reads only the header row of a CSV file.
///
/// Blank header cells are named `Unnamed: {index}`.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    let mut columns = read_raw_headers(path)?;
    fill_blank_headers(&mut columns);
    Ok(columns)
}

/// Reads a CSV file into a [`RawTable`].
///
/// Column types are inferred over the whole file so a ZIP+4 value late in
/// the file does not break an otherwise numeric column.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    check_file_size(path)?;
    let raw_headers = read_raw_headers(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
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

    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "customer list has more than 500 columns"
        );
    }

    let mut table = dataframe_to_table(&df)?;
    for (index, header) in raw_headers.iter().enumerate() {
        if header.is_empty() {
            table.rename_column(index, unnamed_header(index));
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use census_model::CellValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_headers() {
        let file = create_temp_csv("customer_id, Zip Code ,email\n1,90210,a@example.com\n");
        let headers = read_csv_headers(file.path()).unwrap();
        assert_eq!(headers, vec!["customer_id", "Zip Code", "email"]);
    }

    #[test]
    fn test_read_csv_headers_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_headers(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_headers_with_bom() {
        let file = create_temp_csv("\u{feff}zip,email\n90210,a@example.com\n");
        let headers = read_csv_headers(file.path()).unwrap();
        assert_eq!(headers, vec!["zip", "email"]);
    }

    #[test]
    fn test_read_csv_headers_blank_column() {
        let file = create_temp_csv("zip,,email\n90210,x,a@example.com\n");
        let headers = read_csv_headers(file.path()).unwrap();
        assert_eq!(headers, vec!["zip", "Unnamed: 1", "email"]);
    }

    #[test]
    fn test_read_csv_table_trailing_comma() {
        let file = create_temp_csv("customer_id,zip,\n1,90210,\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.headers(), ["customer_id", "zip", "Unnamed: 2"]);
        assert_eq!(table.records()[0].get(1), &CellValue::Integer(90210));
        assert_eq!(table.records()[0].get(2), &CellValue::Empty);
    }

    #[test]
    fn test_utf16_rejected() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        file.write_all(&[0xFF, 0xFE, b'z', 0]).unwrap();
        let result = read_csv_headers(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn test_file_size_limit() {
        let file = create_temp_csv("zip\n90210\n");
        let result = check_file_size_with_limit(file.path(), 4);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
    }

    #[test]
    fn test_read_csv_table() {
        let file = create_temp_csv("customer_id,zip\n1,90210-1234\n2,02134\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.headers(), ["customer_id", "zip"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.records()[0].get(0), &CellValue::Integer(1));
        assert_eq!(table.records()[0].get(1), &CellValue::text("90210-1234"));
    }

    #[test]
    fn test_read_csv_table_header_only() {
        let file = create_temp_csv("customer_id,zip\n");
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table.width(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let result = read_csv_table(Path::new("/nonexistent/customers.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
