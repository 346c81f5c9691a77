//! Error types for GEO metadata ingestion.

use std::path::PathBuf;

use geo_model::ModelError;
use thiserror::Error;

use crate::location::{CellRef, Location};

/// Errors that can occur while assembling submissions from a source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Relational Row Errors ===
    /// Primary-key column null or blank.
    #[error("missing value for primary key {column} in table {table}, row {row}")]
    MissingPrimaryKey {
        table: String,
        column: String,
        row: usize,
    },

    /// The same primary-key value appears twice in one result set.
    #[error("duplicate {column} '{key}' in table {table}, row {row}")]
    DuplicateKey {
        table: String,
        column: String,
        key: String,
        row: usize,
    },

    // === Relational Lookup Errors ===
    #[error("no series row for series {series}")]
    SeriesNotFound { series: String },

    #[error("{count} series rows for series {series}")]
    DuplicateSeries { series: String, count: usize },

    #[error("no platform {platform} found for series {series}")]
    PlatformNotFound { platform: String, series: String },

    #[error("{count} platform rows for platform {platform} referenced by series {series}")]
    DuplicatePlatform {
        platform: String,
        series: String,
        count: usize,
    },

    /// Requested slice exceeds the batched join limit.
    #[error("cannot extract {requested} series in one slice; at most {max} are allowed")]
    SliceTooLarge { requested: usize, max: usize },

    // === Field Errors ===
    #[error("unknown {section} field '{field}' at {cell}")]
    UnknownField {
        section: String,
        field: String,
        cell: CellRef,
    },

    /// Field name or value cell holds text that is empty after trimming.
    #[error("empty field cell at {cell}")]
    EmptyFieldCell { cell: CellRef },

    #[error("missing required field '{field}' in {location}")]
    MissingRequiredField { field: String, location: Location },

    #[error("expected one value for field '{field}' but found {count} in {location}")]
    UnexpectedMultipleValues {
        field: String,
        count: usize,
        location: Location,
    },

    // === Sample Grid Errors ===
    #[error("duplicate sample name '{sample}' at {cell}")]
    DuplicateSample { sample: String, cell: CellRef },

    #[error("characteristic '{characteristic}' repeated for sample '{sample}' at {cell}")]
    RepeatedCharacteristic {
        sample: String,
        characteristic: String,
        cell: CellRef,
    },

    #[error("{count} values for characteristic '{characteristic}' of sample '{sample}'")]
    MultipleCharacteristicValues {
        sample: String,
        characteristic: String,
        count: usize,
    },

    // === Sheet Structure Errors ===
    #[error("no {section} header in sheet '{sheet}'")]
    MissingSection { sheet: String, section: String },

    #[error("{section} section of sheet '{sheet}' has no entries")]
    EmptySection { sheet: String, section: String },

    #[error("workbook has no sheet named '{sheet}'")]
    SheetNotFound { sheet: String },

    #[error("expected {expected} cell at {cell}, found {found}")]
    UnexpectedCellType {
        cell: CellRef,
        expected: &'static str,
        found: &'static str,
    },

    #[error("error value '{value}' in cell {cell}")]
    ErrorCell { cell: CellRef, value: String },

    // === Infrastructure Errors ===
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("unsupported template format: {path} (expected .csv, .xls, .xlsx, .xlsm, .xlsb or .ods)")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid submission: {0}")]
    Model(#[from] ModelError),
}

impl IngestError {
    /// Returns true for problems in the metadata itself.
    ///
    /// Data errors concern one extraction unit and may be skipped by the
    /// caller. Everything else (I/O, database, CSV decoding, an oversized
    /// slice request) is fatal to the run.
    pub fn is_data_error(&self) -> bool {
        !matches!(
            self,
            Self::Database(_)
                | Self::Csv { .. }
                | Self::FileRead { .. }
                | Self::Workbook { .. }
                | Self::UnsupportedFormat { .. }
                | Self::SliceTooLarge { .. }
                | Self::SheetNotFound { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
