//! GEO submission metadata ingestion.
//!
//! This crate turns loosely typed GEO metadata into
//! [`geo_model::SubmissionMetadata`] aggregates. It reads two source formats:
//!
//! - **GEOmetadb snapshots**: the relational `gse`/`gsm`/`gpl` tables, read
//!   through a [`MetadataSource`] ([`SqliteSource`] or [`MemorySource`]) and
//!   assembled a slice of series at a time
//! - **Metadata templates**: the GEO spreadsheet template, read through a
//!   [`Sheet`] ([`Grid`], a CSV export via [`read_sheet_csv`], or a workbook
//!   via [`read_workbook`])
//!
//! Both paths validate primary keys, required fields and cross references,
//! and report failures as [`IngestError`] values carrying the offending
//! table row or sheet cell.
//!
//! # Example
//!
//! ```ignore
//! use geo_ingest::{PlatformCache, RelationalOptions, SqliteSource, assemble_submissions};
//!
//! let source = SqliteSource::open("GEOmetadb.sqlite")?;
//! let mut cache = PlatformCache::new();
//! let submissions =
//!     assemble_submissions(&source, 0, 100, &mut cache, &RelationalOptions::default())?;
//! ```

mod error;
mod location;
pub mod relational;
pub mod spreadsheet;
pub mod text;

// === Error Types ===
pub use error::{IngestError, Result};
pub use location::{CellRef, Location, column_letters};

// === Relational Snapshots ===
pub use relational::{
    ErrorPolicy, MemorySource, MetadataSource, PlatformCache, RawRow, RelationalAssembler,
    RelationalOptions, SqliteSource, TableRow, assemble_submissions, extract_table_rows, raw_row,
};

// === Spreadsheet Templates ===
pub use spreadsheet::{
    Cell, FieldBlock, FieldRows, Grid, Sheet, SpreadsheetOptions, TemplateFormat, Workbook,
    assemble_from_sheet, assemble_from_workbook, find_header_row, parse_sample_block,
    read_sheet_csv, read_template, read_template_csv, read_template_workbook, read_workbook,
};
