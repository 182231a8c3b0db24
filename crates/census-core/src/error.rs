/// Message shown when no ZIP column can be found in the input headers.
pub const NO_ZIP_COLUMN_MESSAGE: &str = "Error: Could not detect a Zip Code column. Please rename your header to 'Zip' or 'Postal Code'.";

/// Failures of one enrichment request.
///
/// Rows that find no reference match are not errors; they surface as
/// unmatched records.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("{}", NO_ZIP_COLUMN_MESSAGE)]
    NoZipColumn { headers: Vec<String> },

    #[error("column '{column}' not found in input")]
    ColumnNotFound { column: String },
}

pub type Result<T> = std::result::Result<T, EnrichError>;
