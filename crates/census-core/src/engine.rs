//! ZIP join between a customer table and the census reference.

use std::time::Instant;

use census_ingest::{ZipColumn, detect_zip_column};
use census_model::{
    CanonicalZip, Demographics, EnrichedRecord, EnrichedTable, RawTable, SummaryMetrics,
};
use census_reference::{POPULATION_FLOOR, ReferenceStore};
use tracing::{debug, info, info_span};

use crate::error::{EnrichError, Result};
use crate::layout::presentation_layout;
use crate::metrics::summarize;

/// Output of one enrichment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub table: EnrichedTable,
    pub metrics: SummaryMetrics,
    /// Input header used as the join key.
    pub zip_column: String,
    /// Position of `zip_column` in the input headers.
    pub zip_index: usize,
}

/// Options for [`enrich_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentOptions {
    /// Ignore reference rows whose population is below [`POPULATION_FLOOR`].
    pub exclude_low_population: bool,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            exclude_low_population: true,
        }
    }
}

/// Left-joins `input` with the reference table on the canonical form of
/// `zip_column`.
///
/// Every input row appears once in the output, in input order. Rows whose ZIP
/// has no reference entry (or whose entry falls below the population floor
/// when `exclude_low_population` is set) keep absent demographics.
pub fn enrich(
    input: &RawTable,
    zip_column: &str,
    reference: &ReferenceStore,
    exclude_low_population: bool,
) -> Result<Enrichment> {
    let zip_index = input
        .column_index(zip_column)
        .ok_or_else(|| EnrichError::ColumnNotFound {
            column: zip_column.to_string(),
        })?;
    Ok(enrich_at(input, zip_index, reference, exclude_low_population))
}

fn enrich_at(
    input: &RawTable,
    zip_index: usize,
    reference: &ReferenceStore,
    exclude_low_population: bool,
) -> Enrichment {
    let zip_column = input.headers()[zip_index].as_str();
    let span = info_span!(
        "enrich",
        zip_column = %zip_column,
        rows = input.height(),
        exclude_low_population
    );
    let _guard = span.enter();
    let start = Instant::now();

    let view = if exclude_low_population {
        reference.filtered(Some(POPULATION_FLOOR))
    } else {
        reference.filtered(None)
    };

    let records: Vec<EnrichedRecord> = input
        .records()
        .iter()
        .map(|record| {
            let key = CanonicalZip::from_cell(record.get(zip_index));
            EnrichedRecord {
                source: record.clone(),
                demographics: view.get(&key).map(Demographics::from),
            }
        })
        .collect();

    let metrics = summarize(&records);
    let layout = presentation_layout(input.headers(), zip_index);
    let table = EnrichedTable::new(layout.headers, layout.columns, records);

    debug!(
        reference_rows = view.len(),
        unmatched_rows = metrics.unmatched_rows(),
        "join complete"
    );
    info!(
        total_rows = metrics.total_rows,
        matched_rows = metrics.matched_rows,
        match_rate = metrics.match_rate,
        duration_ms = start.elapsed().as_millis(),
        "enrichment complete"
    );

    Enrichment {
        table,
        metrics,
        zip_column: zip_column.to_string(),
        zip_index,
    }
}

/// Detects the ZIP column of `input` and enriches it.
///
/// The join runs on the detected column position, so a header name that
/// occurs twice cannot redirect it. Fails with [`EnrichError::NoZipColumn`]
/// when no header qualifies.
pub fn enrich_table(
    input: &RawTable,
    reference: &ReferenceStore,
    options: EnrichmentOptions,
) -> Result<Enrichment> {
    let ZipColumn { index, .. } =
        detect_zip_column(input.headers()).ok_or_else(|| EnrichError::NoZipColumn {
            headers: input.headers().to_vec(),
        })?;
    Ok(enrich_at(
        input,
        index,
        reference,
        options.exclude_low_population,
    ))
}
