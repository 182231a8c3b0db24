//! Excel workbook reading.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use census_model::{CellValue, RawRecord, RawTable};

use crate::csv::{fill_blank_headers, normalize_header};
use crate::error::{IngestError, Result};

/// Reads the first worksheet of a workbook into a [`RawTable`].
///
/// The first row of the sheet's used range is the header row. Blank header
/// cells are named `Unnamed: {index}`.
pub fn read_excel_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyCsv {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })?;

    let mut headers: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell_to_value(cell).to_string()))
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    let unnamed = fill_blank_headers(&mut headers);
    if unnamed > 0 {
        tracing::debug!(path = %path.display(), unnamed, "named blank header cells");
    }

    let records: Vec<RawRecord> = rows
        .map(|row| RawRecord::new(row.iter().map(cell_to_value).collect()))
        .collect();

    tracing::debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = records.len(),
        columns = headers.len(),
        "read workbook"
    );

    Ok(RawTable::new(headers, records))
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.clone()),
        Data::Int(n) => CellValue::Integer(*n),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Error(e) => CellValue::Text(format!("#ERR({:?})", e)),
        Data::DateTime(dt) => CellValue::Text(format!("{}", dt)),
        Data::DateTimeIso(s) => CellValue::text(s.clone()),
        Data::DurationIso(s) => CellValue::text(s.clone()),
    }
}
