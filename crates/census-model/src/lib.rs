//! Data model for customer demographics enrichment.
//!
//! The model keeps user-supplied tables opaque: every input column is carried
//! as an ordered [`CellValue`] sequence, and only the three demographic fields
//! joined from the reference table are typed.
//!
//! # Types
//!
//! - [`RawTable`] / [`RawRecord`]: the customer list as parsed from disk
//! - [`CanonicalZip`]: the normalized 5-character join key
//! - [`ReferenceRecord`]: one row of the census reference table
//! - [`EnrichedTable`] / [`EnrichedRecord`]: the joined, presentation-ordered output
//! - [`SummaryMetrics`]: match rate and averages over matched rows

pub mod cell;
pub mod enriched;
pub mod metrics;
pub mod reference;
pub mod table;
pub mod zip;

pub use cell::CellValue;
pub use enriched::{
    Demographics, EnrichedRecord, EnrichedTable, HOUSEHOLD_INCOME_COLUMN, MEDIAN_AGE_COLUMN,
    OutputColumn, ZIP_POPULATION_COLUMN,
};
pub use metrics::SummaryMetrics;
pub use reference::ReferenceRecord;
pub use table::{RawRecord, RawTable};
pub use zip::{CANONICAL_ZIP_WIDTH, CanonicalZip};
