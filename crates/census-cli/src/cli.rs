//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use census_cli::preview::PREVIEW_ROWS;
use census_report::{DEFAULT_REPORT_TYPE, ReportFormat};

#[derive(Parser)]
#[command(
    name = "census-enrich",
    version,
    about = "Enrich a customer list with ZIP-level census demographics",
    long_about = "Enrich a customer list with ZIP-level census demographics.\n\n\
                  Detects the ZIP column of a CSV or Excel file, joins median household\n\
                  income, median age and population by ZIP code, and writes an Excel or\n\
                  CSV report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow customer values (ZIP codes) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enrich a customer file and write the report.
    Enrich(EnrichArgs),

    /// Load the census reference table and describe it.
    Reference(ReferenceArgs),

    /// Show which column would be used as the ZIP column.
    Detect(DetectArgs),
}

#[derive(Parser)]
pub struct EnrichArgs {
    /// Customer list (.csv, .xlsx, .xls, .xlsm, .ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Report path (default: <INPUT stem>_enriched.<format> next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: FormatArg,

    /// Keep ZIP areas with population below 100.
    #[arg(long = "include-low-population")]
    pub include_low_population: bool,

    /// Census reference CSV (default: $CENSUS_REFERENCE_PATH, then ./census_reference.csv).
    #[arg(long = "reference", value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Rows to show in the terminal preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Skip the terminal preview.
    #[arg(long = "no-preview")]
    pub no_preview: bool,

    /// Report type printed in the report side panel.
    #[arg(long = "report-type", value_name = "TEXT", default_value = DEFAULT_REPORT_TYPE)]
    pub report_type: String,

    /// Also write run metrics as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ReferenceArgs {
    /// Census reference CSV (default: $CENSUS_REFERENCE_PATH, then ./census_reference.csv).
    #[arg(long = "reference", value_name = "PATH")]
    pub reference: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DetectArgs {
    /// Customer list (.csv, .xlsx, .xls, .xlsm, .ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => Self::Xlsx,
            FormatArg::Csv => Self::Csv,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
