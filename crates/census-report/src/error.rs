use std::path::PathBuf;

/// Failures writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build workbook archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to write workbook XML: {0}")]
    Xml(#[from] std::io::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{rows} rows do not fit in one worksheet (limit {max}); use CSV output")]
    TooManyRows { rows: usize, max: usize },

    #[error("{columns} columns do not fit in one worksheet (limit {max}); use CSV output")]
    TooManyColumns { columns: usize, max: usize },

    #[error("cell {cell} holds {length} characters, more than the {max} a worksheet cell allows")]
    CellTooLong {
        cell: String,
        length: usize,
        max: usize,
    },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
