//! GEO metadata template ingestion.
//!
//! The template is a single sheet with section headers in column A.
//! SERIES, PROTOCOLS and PLATFORM hold two-column `field | value` blocks;
//! SAMPLES holds a grid whose header row starts with `Sample name`.
//! Templates are read from CSV exports or from xls, xlsx and ods workbooks.

mod assembler;
mod grid;
mod loader;
mod locator;
pub mod names;
mod sheet;

pub use assembler::{
    SpreadsheetOptions, assemble_from_sheet, assemble_from_workbook, read_template,
    read_template_csv, read_template_workbook,
};
pub use grid::{
    GridField, GridValue, SampleBlock, SampleEntry, SampleRows, parse_sample_block,
    read_column_headers,
};
pub use loader::{TemplateFormat, read_workbook};
pub use locator::{FieldBlock, FieldEntry, FieldRows, find_header_row, find_header_row_from};
pub use sheet::{Cell, Grid, Sheet, Workbook, read_sheet_csv};
