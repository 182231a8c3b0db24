#![deny(unsafe_code)]

use std::path::PathBuf;

/// Failures loading the census reference table.
///
/// All of these are fatal: enrichment must not run against a missing or
/// partial reference set.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("reference file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to parse reference CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    #[error("invalid {column} value '{value}' on line {line} of {path}")]
    InvalidValue {
        column: &'static str,
        value: String,
        line: u64,
        path: PathBuf,
    },

    #[error("duplicate zip code {zip} on line {line} of {path}")]
    DuplicateZip { zip: String, line: u64, path: PathBuf },

    #[error("reference file {path} has no rows")]
    Empty { path: PathBuf },
}

impl ReferenceError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        let path = path.into();
        if let csv::ErrorKind::Io(io) = source.kind() {
            if io.kind() == std::io::ErrorKind::NotFound {
                return Self::NotFound { path };
            }
        }
        Self::Csv { path, source }
    }
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
