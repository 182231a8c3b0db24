//! Report generation for enriched customer lists.
//!
//! - **Workbook**: a single-sheet `.xlsx` with the enriched table and a
//!   side panel describing the report
//! - **CSV**: the same ordered table without styling
//! - **Formatting**: currency, thousands and age strings shared with the CLI

mod error;
mod export;
mod format;
mod metadata;
mod sheet;
mod workbook;

pub use error::{ReportError, Result};
pub use export::{ReportFormat, write_csv, write_report};
pub use format::{
    format_age, format_currency, format_decimal, format_percent, format_thousands,
};
pub use metadata::{
    DEFAULT_REPORT_TYPE, PANEL_BLOCKS, PanelBlock, REPORT_TITLE, ReportMetadata, WEBSITE_URL,
};
pub use sheet::{SheetGeometry, cell_ref, column_letter};
pub use workbook::{SHEET_NAME, assemble_workbook};
