//! Relational source contract.

use std::collections::BTreeMap;

use crate::error::Result;

use super::names;

/// One raw table row: column name -> cell text (`None` for SQL NULL).
pub type RawRow = BTreeMap<String, Option<String>>;

/// Read access to a GEOmetadb-shaped snapshot.
///
/// Implementations return rows verbatim; trimming, key checks and field
/// rules are applied by the assembler. Columns missing from a row read as
/// null.
pub trait MetadataSource {
    /// Every series identifier, in source order.
    fn series_ids(&self) -> Result<Vec<String>>;

    /// Every sample row whose `series_id` is one of `series_ids`, in one batched read.
    fn sample_rows(&self, series_ids: &[String]) -> Result<Vec<RawRow>>;

    /// Rows of the series table matching `series_id`.
    fn series_rows(&self, series_id: &str) -> Result<Vec<RawRow>>;

    /// Rows of the platform table matching `platform_id`.
    fn platform_rows(&self, platform_id: &str) -> Result<Vec<RawRow>>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn series_ids(&self) -> Result<Vec<String>> {
        (**self).series_ids()
    }

    fn sample_rows(&self, series_ids: &[String]) -> Result<Vec<RawRow>> {
        (**self).sample_rows(series_ids)
    }

    fn series_rows(&self, series_id: &str) -> Result<Vec<RawRow>> {
        (**self).series_rows(series_id)
    }

    fn platform_rows(&self, platform_id: &str) -> Result<Vec<RawRow>> {
        (**self).platform_rows(platform_id)
    }
}

/// Builds a raw row from `(column, value)` pairs.
pub fn raw_row<'a>(cells: impl IntoIterator<Item = (&'a str, &'a str)>) -> RawRow {
    cells
        .into_iter()
        .map(|(column, value)| (column.to_string(), Some(value.to_string())))
        .collect()
}

fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).and_then(Option::as_deref)
}

fn matching(rows: &[RawRow], column: &str, value: &str) -> Vec<RawRow> {
    rows.iter()
        .filter(|row| cell(row, column).map(str::trim) == Some(value))
        .cloned()
        .collect()
}

/// In-memory tables, for callers that already hold rows.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: Vec<RawRow>,
    samples: Vec<RawRow>,
    platforms: Vec<RawRow>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series(mut self, row: RawRow) -> Self {
        self.series.push(row);
        self
    }

    #[must_use]
    pub fn with_sample(mut self, row: RawRow) -> Self {
        self.samples.push(row);
        self
    }

    #[must_use]
    pub fn with_platform(mut self, row: RawRow) -> Self {
        self.platforms.push(row);
        self
    }
}

impl MetadataSource for MemorySource {
    fn series_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .series
            .iter()
            .filter_map(|row| cell(row, names::SERIES_GSE))
            .map(|gse| gse.trim().to_string())
            .collect())
    }

    fn sample_rows(&self, series_ids: &[String]) -> Result<Vec<RawRow>> {
        Ok(self
            .samples
            .iter()
            .filter(|row| {
                cell(row, names::SAMPLE_SERIES_ID)
                    .is_some_and(|id| series_ids.iter().any(|wanted| wanted == id.trim()))
            })
            .cloned()
            .collect())
    }

    fn series_rows(&self, series_id: &str) -> Result<Vec<RawRow>> {
        Ok(matching(&self.series, names::SERIES_GSE, series_id))
    }

    fn platform_rows(&self, platform_id: &str) -> Result<Vec<RawRow>> {
        Ok(matching(&self.platforms, names::PLATFORM_GPL, platform_id))
    }
}
