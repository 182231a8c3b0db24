//! Customer list ingestion.
//!
//! This crate loads user-supplied customer lists (CSV or Excel) into
//! [`census_model::RawTable`]s and finds the column that holds ZIP codes.
//!
//! # Features
//!
//! - **CSV Loading**: Polars-backed parsing with whole-file type inference
//! - **Excel Loading**: first worksheet of `.xlsx`, `.xls`, `.xlsm`, `.ods`
//! - **ZIP Detection**: two-pass ranked matching of header names
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use census_ingest::{detect_zip_column, read_table};
//!
//! let table = read_table(Path::new("customers.csv"))?;
//! let zip = detect_zip_column(table.headers());
//! ```

mod csv;
mod detection;
mod error;
mod excel;
mod frame;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Table Reading ===
pub use csv::{MAX_CSV_FILE_SIZE, read_csv_headers, read_csv_table};
pub use excel::read_excel_table;
pub use frame::dataframe_to_table;
pub use source::{InputFormat, read_headers, read_table};

// === ZIP Detection ===
pub use detection::{MatchKind, ZIP_HEADER_CANDIDATES, ZipColumn, detect_zip_column};
