//! GEOmetadb snapshot ingestion.
//!
//! The snapshot holds three tables (`gse`, `gsm`, `gpl`) linked by the
//! sample's `series_id` and `gpl` columns. [`assemble_submissions`] joins
//! them for a slice of series and emits one submission per series.

mod assembler;
mod cache;
pub mod names;
mod rows;
mod source;
mod sqlite;

pub use assembler::{ErrorPolicy, RelationalAssembler, RelationalOptions, assemble_submissions};
pub use cache::PlatformCache;
pub use rows::{TableRow, extract_table_rows};
pub use source::{MemorySource, MetadataSource, RawRow, raw_row};
pub use sqlite::SqliteSource;
