//! Enrichment run orchestration: ingest, enrich, write.
//!
//! Each stage runs in its own span and logs counts with `duration_ms`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use census_core::{Enrichment, EnrichmentOptions, enrich_table};
use census_ingest::read_table;
use census_model::{CanonicalZip, RawTable, SummaryMetrics};
use census_reference::{ReferenceStore, resolve_reference_path, shared};
use census_report::{ReportFormat, ReportMetadata, write_report};
use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use crate::logging::redact_value;

/// Unmatched ZIP values logged at trace level per run.
const UNMATCHED_SAMPLE: usize = 5;

/// One enrichment request, independent of how it was parsed.
#[derive(Debug, Clone)]
pub struct EnrichRequest {
    pub input: PathBuf,
    /// Defaults to [`default_output_path`].
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
    pub exclude_low_population: bool,
    pub report_type: String,
    /// Optional machine-readable summary file.
    pub summary_json: Option<PathBuf>,
}

/// Result of a completed enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichRun {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ReportFormat,
    pub exclude_low_population: bool,
    pub enrichment: Enrichment,
}

impl EnrichRun {
    pub fn metrics(&self) -> &SummaryMetrics {
        &self.enrichment.metrics
    }
}

/// Serialized form of `--summary-json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub zip_column: &'a str,
    pub exclude_low_population: bool,
    #[serde(flatten)]
    pub metrics: &'a SummaryMetrics,
}

impl<'a> From<&'a EnrichRun> for RunSummary<'a> {
    fn from(run: &'a EnrichRun) -> Self {
        Self {
            input: &run.input,
            output: &run.output,
            zip_column: &run.enrichment.zip_column,
            exclude_low_population: run.exclude_low_population,
            metrics: &run.enrichment.metrics,
        }
    }
}

/// `<stem>_enriched.<ext>` next to the input file.
pub fn default_output_path(input: &Path, format: ReportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("customers");
    input.with_file_name(format!("{stem}_enriched.{}", format.extension()))
}

/// Loads the process-wide reference store.
///
/// `explicit` wins over `CENSUS_REFERENCE_PATH`, which wins over
/// `census_reference.csv` in the working directory.
pub fn load_reference(explicit: Option<&Path>) -> Result<&'static ReferenceStore> {
    let path = resolve_reference_path(explicit);
    let span = info_span!("reference", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let store =
        shared(&path).with_context(|| format!("load reference table {}", path.display()))?;
    debug!(
        zips = store.len(),
        duration_ms = start.elapsed().as_millis(),
        "reference ready"
    );
    Ok(store)
}

/// Runs one enrichment request against `reference` and writes the report.
///
/// Nothing is written when ingest or ZIP detection fails.
pub fn run_enrichment(request: &EnrichRequest, reference: &ReferenceStore) -> Result<EnrichRun> {
    let run_span = info_span!("run", input = %request.input.display());
    let _run_guard = run_span.enter();

    let table = info_span!("ingest").in_scope(|| -> Result<RawTable> {
        let start = Instant::now();
        let table = read_table(&request.input)
            .with_context(|| format!("read {}", request.input.display()))?;
        info!(
            rows = table.height(),
            columns = table.width(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok(table)
    })?;

    let options = EnrichmentOptions {
        exclude_low_population: request.exclude_low_population,
    };
    let enrichment = enrich_table(&table, reference, options)?;
    log_unmatched_sample(&enrichment);

    let output = request
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&request.input, request.format));
    let metadata = ReportMetadata::new(request.report_type.clone());

    info_span!("report", format = request.format.extension()).in_scope(|| -> Result<()> {
        let start = Instant::now();
        write_report(
            &output,
            request.format,
            &enrichment.table,
            &enrichment.metrics,
            &metadata,
        )
        .with_context(|| format!("write report {}", output.display()))?;
        info!(
            path = %output.display(),
            duration_ms = start.elapsed().as_millis(),
            "report complete"
        );
        Ok(())
    })?;

    let run = EnrichRun {
        input: request.input.clone(),
        output,
        format: request.format,
        exclude_low_population: request.exclude_low_population,
        enrichment,
    };

    if let Some(path) = &request.summary_json {
        write_summary_json(path, &run)?;
    }
    Ok(run)
}

/// Writes the `--summary-json` document.
pub fn write_summary_json(path: &Path, run: &EnrichRun) -> Result<()> {
    let json = serde_json::to_string_pretty(&RunSummary::from(run))
        .context("serialize run summary")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "wrote run summary");
    Ok(())
}

fn log_unmatched_sample(enrichment: &Enrichment) {
    let unmatched = enrichment
        .table
        .records()
        .iter()
        .filter(|record| !record.is_matched())
        .take(UNMATCHED_SAMPLE);
    for record in unmatched {
        let zip = CanonicalZip::from_cell(record.source.get(enrichment.zip_index));
        trace!(zip = redact_value(zip.as_str()), "no reference match");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/customers.csv"), ReportFormat::Xlsx),
            PathBuf::from("/data/customers_enriched.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("list.xlsx"), ReportFormat::Csv),
            PathBuf::from("list_enriched.csv")
        );
    }

    #[test]
    fn test_run_summary_json() {
        let metrics = SummaryMetrics {
            total_rows: 10,
            matched_rows: 7,
            match_rate: 0.7,
            mean_income: Some(85_000.0),
            mean_age: None,
        };
        let summary = RunSummary {
            input: Path::new("customers.csv"),
            output: Path::new("customers_enriched.xlsx"),
            zip_column: "Postal Code",
            exclude_low_population: true,
            metrics: &metrics,
        };

        let json = serde_json::to_string_pretty(&summary).unwrap();

        insta::assert_snapshot!(json, @r#"
        {
          "input": "customers.csv",
          "output": "customers_enriched.xlsx",
          "zip_column": "Postal Code",
          "exclude_low_population": true,
          "total_rows": 10,
          "matched_rows": 7,
          "match_rate": 0.7,
          "mean_income": 85000.0,
          "mean_age": null
        }
        "#);
    }
}
