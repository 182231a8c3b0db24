use anyhow::{Context, Result};
use tracing::info;

use census_cli::pipeline::{EnrichRequest, EnrichRun, load_reference, run_enrichment};
use census_cli::summary::reference_table;
use census_core::{EnrichError, NO_ZIP_COLUMN_MESSAGE};
use census_ingest::{detect_zip_column, read_headers};

use crate::cli::{DetectArgs, EnrichArgs, ReferenceArgs};

pub fn run_enrich(args: &EnrichArgs) -> Result<EnrichRun> {
    let reference = load_reference(args.reference.as_deref())?;
    let request = EnrichRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        format: args.format.into(),
        exclude_low_population: !args.include_low_population,
        report_type: args.report_type.clone(),
        summary_json: args.summary_json.clone(),
    };
    run_enrichment(&request, reference)
}

pub fn run_reference(args: &ReferenceArgs) -> Result<()> {
    let store = load_reference(args.reference.as_deref())?;
    println!("{}", reference_table(store));
    Ok(())
}

pub fn run_detect(args: &DetectArgs) -> Result<()> {
    let headers =
        read_headers(&args.input).with_context(|| format!("read {}", args.input.display()))?;
    let found = detect_zip_column(headers.as_slice())
        .ok_or_else(|| EnrichError::NoZipColumn {
            headers: headers.clone(),
        })?;
    info!(column = %found.name, kind = %found.kind, "zip column detected");
    println!(
        "ZIP column: '{}' (column {}, {} match on '{}')",
        found.name,
        found.index + 1,
        found.kind,
        found.candidate
    );
    Ok(())
}

/// Prints a failed command's error and returns the exit code.
///
/// A missing ZIP column prints its fixed message as-is.
pub fn report_error(error: &anyhow::Error) -> i32 {
    if let Some(EnrichError::NoZipColumn { .. }) = error.downcast_ref::<EnrichError>() {
        eprintln!("{NO_ZIP_COLUMN_MESSAGE}");
    } else {
        eprintln!("error: {error:#}");
    }
    1
}
