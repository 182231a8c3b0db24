//! Input format dispatch.

use std::path::Path;

use census_model::RawTable;

use crate::csv::{read_csv_headers, read_csv_table};
use crate::error::{IngestError, Result};
use crate::excel::read_excel_table;

/// Supported customer list formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    /// `.xlsx`, `.xls`, `.xlsm`, `.ods`
    Excel,
}

impl InputFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "ods" => Ok(Self::Excel),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Reads a customer list, choosing the parser by extension.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let table = match InputFormat::from_path(path)? {
        InputFormat::Csv => read_csv_table(path)?,
        InputFormat::Excel => read_excel_table(path)?,
    };
    tracing::info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded customer list"
    );
    Ok(table)
}

/// Reads only the header row of a customer list.
///
/// CSV files are not parsed past the first line; workbooks are opened fully.
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    match InputFormat::from_path(path)? {
        InputFormat::Csv => read_csv_headers(path),
        InputFormat::Excel => Ok(read_excel_table(path)?.headers().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("customers.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("customers.xlsx")).unwrap(),
            InputFormat::Excel
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("customers.json")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
        assert!(InputFormat::from_path(Path::new("customers")).is_err());
    }
}
