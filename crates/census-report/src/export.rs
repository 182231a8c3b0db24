//! Report file output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use census_model::{EnrichedTable, SummaryMetrics};

use crate::error::{ReportError, Result};
use crate::metadata::ReportMetadata;
use crate::workbook::assemble_workbook;

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Writes the ordered enriched table as CSV.
///
/// Absent demographics become empty fields; numbers use their shortest
/// display form (`120000`, `41.2`).
pub fn write_csv<W: Write>(table: &EnrichedTable, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(table.headers())?;
    for row in table.rows() {
        out.write_record(row.iter().map(ToString::to_string))?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    Ok(())
}

/// Writes the report to `path` in `format`.
pub fn write_report(
    path: &Path,
    format: ReportFormat,
    table: &EnrichedTable,
    metrics: &SummaryMetrics,
    metadata: &ReportMetadata,
) -> Result<()> {
    ensure_parent_dir(path)?;
    match format {
        ReportFormat::Xlsx => {
            let bytes = assemble_workbook(table, metrics, metadata)?;
            fs::write(path, bytes).map_err(|e| ReportError::io(path, e))?;
        }
        ReportFormat::Csv => {
            let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
            write_csv(table, BufWriter::new(file))?;
        }
    }
    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        rows = table.height(),
        "wrote report"
    );
    Ok(())
}
