//! Multi-column sample grid parsing.

use std::collections::BTreeSet;

use crate::error::{IngestError, Result};
use crate::location::CellRef;

use super::sheet::Sheet;

/// One cell value of a sample row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridValue {
    pub value: String,
    pub cell: CellRef,
}

/// All values of one column header for one sample. Repeated headers
/// collapse into a single multi-valued field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridField {
    pub name: String,
    pub values: Vec<GridValue>,
}

/// One data row of the sample grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEntry {
    pub name: String,
    pub name_cell: CellRef,
    /// Fields in first-seen column order.
    pub fields: Vec<GridField>,
}

impl SampleEntry {
    pub fn field(&self, name: &str) -> Option<&GridField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn values(&self, name: &str) -> Vec<String> {
        self.field(name)
            .map(|field| field.values.iter().map(|v| v.value.clone()).collect())
            .unwrap_or_default()
    }

    fn push(&mut self, name: &str, value: GridValue) {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.values.push(value),
            None => self.fields.push(GridField {
                name: name.to_string(),
                values: vec![value],
            }),
        }
    }
}

/// Reads the header row: text cells from column 0 up to the first blank.
pub fn read_column_headers<S: Sheet + ?Sized>(sheet: &S, header_row: usize) -> Result<Vec<String>> {
    let mut headers = Vec::new();
    while let Some(header) = sheet.text_at(header_row, headers.len())? {
        headers.push(header);
    }
    Ok(headers)
}

/// Lazily reads sample rows below a header row.
///
/// Stops at the first row whose sample-name cell (column 0) is missing or
/// blank. Only the columns covered by `headers` are read, and data cells
/// holding only whitespace are skipped.
pub struct SampleRows<'a, S: ?Sized> {
    sheet: &'a S,
    headers: &'a [String],
    row: usize,
    done: bool,
}

impl<'a, S: Sheet + ?Sized> SampleRows<'a, S> {
    pub fn new(sheet: &'a S, headers: &'a [String], first_row: usize) -> Self {
        Self {
            sheet,
            headers,
            row: first_row,
            done: false,
        }
    }

    fn read_row(&self) -> Result<Option<SampleEntry>> {
        let row = self.row;
        let Some(name) = self.sheet.value_at(row, 0)? else {
            return Ok(None);
        };
        let mut entry = SampleEntry {
            name,
            name_cell: self.sheet.cell_ref(row, 0),
            fields: Vec::new(),
        };
        for (column, header) in self.headers.iter().enumerate().skip(1) {
            if let Some(value) = self.sheet.data_value_at(row, column)? {
                entry.push(
                    header,
                    GridValue {
                        value,
                        cell: self.sheet.cell_ref(row, column),
                    },
                );
            }
        }
        Ok(Some(entry))
    }
}

impl<S: Sheet + ?Sized> Iterator for SampleRows<'_, S> {
    type Item = Result<SampleEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.sheet.last_row().is_none_or(|last| self.row > last) {
            return None;
        }
        match self.read_row() {
            Ok(Some(entry)) => {
                self.row += 1;
                Some(Ok(entry))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// A parsed sample grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBlock {
    pub headers: Vec<String>,
    /// Samples in sheet order.
    pub samples: Vec<SampleEntry>,
}

/// Parses the sample grid whose header row is `header_row`.
///
/// # Errors
///
/// Returns [`IngestError::DuplicateSample`] when a sample name repeats, and
/// propagates cell errors from the header and data rows.
pub fn parse_sample_block<S: Sheet + ?Sized>(sheet: &S, header_row: usize) -> Result<SampleBlock> {
    let headers = read_column_headers(sheet, header_row)?;
    let mut seen = BTreeSet::new();
    let mut samples = Vec::new();

    for entry in SampleRows::new(sheet, &headers, header_row + 1) {
        let entry = entry?;
        if !seen.insert(entry.name.clone()) {
            return Err(IngestError::DuplicateSample {
                sample: entry.name,
                cell: entry.name_cell,
            });
        }
        samples.push(entry);
    }

    tracing::debug!(
        columns = headers.len(),
        samples = samples.len(),
        "parsed sample grid"
    );
    Ok(SampleBlock { headers, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::sheet::{Cell, Grid};

    fn grid() -> Grid {
        Grid::from_text_rows(
            "Metadata Example",
            &[
                &["Sample name", "title", "raw data file", "raw data file", "", "ignored"],
                &["liver-1", "Liver 1", "l1a.cel", "l1b.cel", "", "x"],
                &["liver-2", "Liver 2", "", "l2b.cel"],
                &["", "orphan"],
                &["liver-3", "Liver 3"],
            ],
        )
    }

    #[test]
    fn test_headers_stop_at_first_blank() {
        let headers = read_column_headers(&grid(), 0).unwrap();
        assert_eq!(headers, vec!["Sample name", "title", "raw data file", "raw data file"]);
    }

    #[test]
    fn test_repeated_columns_collapse() {
        let block = parse_sample_block(&grid(), 0).unwrap();
        assert_eq!(block.samples.len(), 2);

        let first = &block.samples[0];
        assert_eq!(first.name, "liver-1");
        assert_eq!(first.values("raw data file"), vec!["l1a.cel", "l1b.cel"]);
        assert_eq!(first.values("title"), vec!["Liver 1"]);
        assert!(first.field("ignored").is_none());

        let second = &block.samples[1];
        assert_eq!(second.values("raw data file"), vec!["l2b.cel"]);
        assert_eq!(second.field("raw data file").unwrap().values[0].cell.to_string(), "'Metadata Example'!D3");
    }

    #[test]
    fn test_whitespace_data_cell_is_skipped() {
        let grid = Grid::from_text_rows(
            "s",
            &[
                &["Sample name", "title", "description"],
                &["liver-1", "Liver 1", " \t "],
            ],
        );
        let block = parse_sample_block(&grid, 0).unwrap();
        assert_eq!(block.samples[0].values("title"), vec!["Liver 1"]);
        assert!(block.samples[0].field("description").is_none());
    }

    #[test]
    fn test_duplicate_sample_name() {
        let grid = Grid::from_text_rows(
            "Metadata Example",
            &[&["Sample name", "title"], &["s1", "a"], &["s1", "b"]],
        );
        let result = parse_sample_block(&grid, 0);
        assert!(matches!(
            result,
            Err(IngestError::DuplicateSample { ref sample, ref cell }) if sample == "s1" && cell.row == 2
        ));
    }

    #[test]
    fn test_numeric_sample_names() {
        let grid = Grid::from_rows(
            "s",
            vec![
                vec![Cell::text("Sample name"), Cell::text("title")],
                vec![Cell::Number(1.0), Cell::text("one")],
            ],
        );
        let block = parse_sample_block(&grid, 0).unwrap();
        assert_eq!(block.samples[0].name, "1");
    }

    #[test]
    fn test_non_text_header_is_rejected() {
        let grid = Grid::from_rows("s", vec![vec![Cell::text("Sample name"), Cell::Bool(true)]]);
        assert!(matches!(
            read_column_headers(&grid, 0),
            Err(IngestError::UnexpectedCellType { .. })
        ));
    }
}
