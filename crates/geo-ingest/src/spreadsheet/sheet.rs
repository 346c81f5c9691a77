//! Typed sheet cells and in-memory sheets.

use std::fs::File;
use std::path::Path;

use crate::error::{IngestError, Result};
use crate::location::CellRef;

/// The content of one spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// A formula error such as `#N/A`.
    Error(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "blank",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Error(_) => "error",
        }
    }
}

/// Renders a number without a trailing `.0` when it is integral.
fn render_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Read access to one sheet of a workbook.
pub trait Sheet {
    fn name(&self) -> &str;

    /// Index of the last row that exists, or `None` for an empty sheet.
    fn last_row(&self) -> Option<usize>;

    /// The cell at `(row, column)`, or `None` if the row or cell does not exist.
    fn cell(&self, row: usize, column: usize) -> Option<&Cell>;

    /// Returns true if the cell is missing or blank.
    fn is_blank(&self, row: usize, column: usize) -> bool {
        self.cell(row, column).is_none_or(Cell::is_blank)
    }

    fn cell_ref(&self, row: usize, column: usize) -> CellRef {
        CellRef::new(self.name(), row, column)
    }

    /// Reads a cell that must hold text, such as a header or field name.
    ///
    /// Returns `Ok(None)` for a missing or blank cell.
    ///
    /// # Errors
    ///
    /// [`IngestError::EmptyFieldCell`] for text that is empty after trimming,
    /// [`IngestError::ErrorCell`] for error cells and
    /// [`IngestError::UnexpectedCellType`] for any other non-text cell.
    fn text_at(&self, row: usize, column: usize) -> Result<Option<String>> {
        match self.cell(row, column) {
            None | Some(Cell::Empty) => Ok(None),
            Some(Cell::Text(text)) => non_empty(text, || self.cell_ref(row, column)).map(Some),
            Some(Cell::Error(value)) => Err(IngestError::ErrorCell {
                cell: self.cell_ref(row, column),
                value: value.clone(),
            }),
            Some(other) => Err(IngestError::UnexpectedCellType {
                cell: self.cell_ref(row, column),
                expected: "text",
                found: other.type_name(),
            }),
        }
    }

    /// Reads a cell value as text, rendering numbers and booleans.
    ///
    /// Returns `Ok(None)` for a missing or blank cell.
    fn value_at(&self, row: usize, column: usize) -> Result<Option<String>> {
        match self.cell(row, column) {
            None | Some(Cell::Empty) => Ok(None),
            Some(Cell::Text(text)) => non_empty(text, || self.cell_ref(row, column)).map(Some),
            Some(Cell::Number(value)) => Ok(Some(render_number(*value))),
            Some(Cell::Bool(value)) => Ok(Some(value.to_string())),
            Some(Cell::Error(value)) => Err(IngestError::ErrorCell {
                cell: self.cell_ref(row, column),
                value: value.clone(),
            }),
        }
    }

    /// Like [`Sheet::value_at`], but whitespace-only text reads as blank.
    fn data_value_at(&self, row: usize, column: usize) -> Result<Option<String>> {
        match self.cell(row, column) {
            Some(Cell::Text(text)) if text.trim().is_empty() => Ok(None),
            _ => self.value_at(row, column),
        }
    }
}

fn non_empty(text: &str, cell: impl FnOnce() -> CellRef) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(IngestError::EmptyFieldCell { cell: cell() });
    }
    Ok(trimmed.to_string())
}

/// An in-memory sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Builds a grid of text cells, where `""` is a blank cell.
    pub fn from_text_rows(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|text| text_cell(text)).collect())
            .collect();
        Self::from_rows(name, rows)
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn with_row(mut self, row: Vec<Cell>) -> Self {
        self.push_row(row);
        self
    }

    /// Replaces one cell, growing the grid as needed.
    pub fn set(&mut self, row: usize, column: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, Cell::Empty);
        }
        cells[column] = cell;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn text_cell(text: &str) -> Cell {
    if text.is_empty() {
        Cell::Empty
    } else {
        Cell::text(text)
    }
}

impl Sheet for Grid {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_row(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }
}

/// A named collection of sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Grid>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: Grid) -> Self {
        self.sheets.push(sheet);
        self
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(Sheet::name)
    }

    /// Looks up a sheet by exact name.
    pub fn sheet(&self, name: &str) -> Result<&Grid> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name() == name)
            .ok_or_else(|| IngestError::SheetNotFound {
                sheet: name.to_string(),
            })
    }
}

/// Loads a CSV export of one template sheet.
///
/// Rows may have different lengths. An exactly-empty field is a blank cell;
/// every other field is a text cell.
pub fn read_sheet_csv(path: &Path, sheet_name: &str) -> Result<Grid> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut grid = Grid::new(sheet_name);
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        grid.push_row(record.iter().map(text_cell).collect());
    }

    tracing::debug!(
        path = %path.display(),
        sheet = sheet_name,
        rows = grid.row_count(),
        "read sheet CSV"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_number() {
        assert_eq!(render_number(12.0), "12");
        assert_eq!(render_number(-3.0), "-3");
        assert_eq!(render_number(2.5), "2.5");
    }

    #[test]
    fn test_text_at_rejects_non_text() {
        let grid = Grid::from_rows(
            "Metadata Example",
            vec![vec![Cell::Number(1.0), Cell::Error("#N/A".to_string()), Cell::text("  ")]],
        );
        assert!(matches!(
            grid.text_at(0, 0),
            Err(IngestError::UnexpectedCellType { found: "number", .. })
        ));
        assert!(matches!(grid.text_at(0, 1), Err(IngestError::ErrorCell { .. })));
        assert!(matches!(grid.text_at(0, 2), Err(IngestError::EmptyFieldCell { .. })));
        assert!(matches!(grid.text_at(0, 9), Ok(None)));
        assert!(matches!(grid.text_at(5, 0), Ok(None)));
    }

    #[test]
    fn test_value_at_renders_scalars() {
        let grid = Grid::from_rows(
            "s",
            vec![vec![Cell::Number(45.0), Cell::Bool(true), Cell::text(" liver ")]],
        );
        assert_eq!(grid.value_at(0, 0).unwrap().as_deref(), Some("45"));
        assert_eq!(grid.value_at(0, 1).unwrap().as_deref(), Some("true"));
        assert_eq!(grid.value_at(0, 2).unwrap().as_deref(), Some("liver"));
    }

    #[test]
    fn test_data_value_at_treats_whitespace_as_blank() {
        let grid = Grid::from_rows("s", vec![vec![Cell::text("  "), Cell::Number(3.0)]]);
        assert_eq!(grid.data_value_at(0, 0).unwrap(), None);
        assert_eq!(grid.data_value_at(0, 1).unwrap().as_deref(), Some("3"));
        assert!(grid.value_at(0, 0).is_err());
    }

    #[test]
    fn test_set_grows_grid() {
        let mut grid = Grid::new("s");
        grid.set(2, 3, Cell::text("x"));
        assert_eq!(grid.last_row(), Some(2));
        assert!(grid.is_blank(2, 0));
        assert!(!grid.is_blank(2, 3));
        assert!(grid.is_blank(0, 0));
    }

    #[test]
    fn test_workbook_sheet_lookup() {
        let workbook = Workbook::new().with_sheet(Grid::new("Metadata Example"));
        assert!(workbook.sheet("Metadata Example").is_ok());
        assert!(matches!(
            workbook.sheet("Sheet1"),
            Err(IngestError::SheetNotFound { .. })
        ));
        assert_eq!(workbook.sheet_names().collect::<Vec<_>>(), vec!["Metadata Example"]);
    }

    #[test]
    fn test_read_sheet_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SERIES,").unwrap();
        writeln!(file, "title,\"Liver, kidney study\"").unwrap();
        writeln!(file, ",").unwrap();
        writeln!(file, "SAMPLES").unwrap();
        file.flush().unwrap();

        let grid = read_sheet_csv(file.path(), "Metadata Example").unwrap();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.cell(1, 1), Some(&Cell::text("Liver, kidney study")));
        assert!(grid.is_blank(0, 1));
        assert!(grid.is_blank(2, 0));
        assert!(grid.cell(3, 1).is_none());
    }

    #[test]
    fn test_read_sheet_csv_missing_file() {
        let result = read_sheet_csv(Path::new("/nonexistent/template.csv"), "Metadata Example");
        assert!(matches!(result, Err(IngestError::FileRead { .. })));
    }
}
