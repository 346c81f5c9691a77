//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "geo-meta",
    version,
    about = "Normalize GEO submission metadata",
    long_about = "Normalize GEO submission metadata into one structured model.\n\n\
                  Reads series, samples and platforms from a GEOmetadb SQLite snapshot,\n\
                  or a single submission from the GEO metadata template (xlsx, xls, ods\n\
                  or a CSV export of the template sheet)."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Assemble a slice of series from a GEOmetadb snapshot.
    Db(DbArgs),

    /// Assemble the submission described by a metadata template.
    Template(TemplateArgs),
}

#[derive(Parser)]
pub struct DbArgs {
    /// Path to the GEOmetadb SQLite file.
    #[arg(value_name = "SQLITE")]
    pub database: PathBuf,

    /// Index of the first series in the snapshot's series order.
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Number of series to assemble.
    #[arg(long, default_value_t = 100)]
    pub count: usize,

    /// Largest slice accepted in one run.
    #[arg(long = "max-slice", value_name = "N", default_value_t = geo_ingest::relational::names::MAX_SERIES_PER_SLICE)]
    pub max_slice: usize,

    /// Log and skip series with invalid data instead of stopping.
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,

    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Path to the template workbook (.xlsx, .xls, .ods) or a CSV export of its sheet.
    #[arg(value_name = "TEMPLATE")]
    pub path: PathBuf,

    /// Workbook sheet holding the template; for CSV, the name used in cell locations.
    #[arg(long = "sheet-name", default_value = geo_ingest::spreadsheet::names::DEFAULT_SHEET_NAME)]
    pub sheet_name: String,

    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputArg,
}

/// How assembled submissions are printed.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    /// One table row per submission.
    Summary,
    /// The full submissions as pretty-printed JSON.
    Json,
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
