//! Customer demographics enrichment.
//!
//! Joins a customer [`RawTable`](census_model::RawTable) with the census
//! reference on canonical ZIP, computes [`SummaryMetrics`](census_model::SummaryMetrics)
//! and lays the result out for presentation: ZIP column, the three
//! demographic columns, then the remaining input columns.

mod engine;
mod error;
mod layout;
mod metrics;

pub use engine::{Enrichment, EnrichmentOptions, enrich, enrich_table};
pub use error::{EnrichError, NO_ZIP_COLUMN_MESSAGE, Result};
pub use layout::{INPUT_COLLISION_SUFFIX, PresentationLayout, presentation_layout};
pub use metrics::summarize;
