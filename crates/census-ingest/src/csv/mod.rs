//! CSV reading utilities.

mod header;
mod reader;

pub use header::{fill_blank_headers, normalize_header};
pub use reader::{MAX_CSV_FILE_SIZE, read_csv_headers, read_csv_table};
