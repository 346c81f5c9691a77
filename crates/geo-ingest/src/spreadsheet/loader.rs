//! Template files on disk: CSV exports and spreadsheet workbooks.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};

use crate::error::{IngestError, Result};

use super::sheet::{Cell, Grid, Workbook};

/// File formats a template can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    /// CSV export of the template sheet.
    Csv,
    /// Excel or OpenDocument workbook.
    Workbook,
}

impl TemplateFormat {
    /// Picks the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xls" | "xlsx" | "xlsm" | "xlsb" | "ods") => Ok(Self::Workbook),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Loads every sheet of a workbook into memory.
///
/// The workbook type is detected from the file content. Cells keep their
/// spreadsheet positions, so locations in errors match what the user sees.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(workbook_error)?;

    let mut workbook = Workbook::new();
    for name in sheets.sheet_names() {
        let range = sheets.worksheet_range(&name).map_err(workbook_error)?;
        let grid = grid_from_range(&name, &range);
        tracing::debug!(sheet = %name, rows = grid.row_count(), "loaded worksheet");
        workbook = workbook.with_sheet(grid);
    }
    Ok(workbook)
}

fn grid_from_range(name: &str, range: &Range<Data>) -> Grid {
    let mut grid = Grid::new(name);
    let Some((first_row, first_column)) = range.start() else {
        return grid;
    };
    for (row, column, data) in range.used_cells() {
        let cell = cell_from_data(data);
        if !cell.is_blank() {
            grid.set(
                first_row as usize + row,
                first_column as usize + column,
                cell,
            );
        }
    }
    grid
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) if text.is_empty() => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Float(value) => Cell::Number(*value),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => Cell::Number(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
        Data::Error(error) => Cell::Error(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            TemplateFormat::from_path(Path::new("template.CSV")).unwrap(),
            TemplateFormat::Csv
        );
        for name in ["a.xlsx", "a.xls", "a.XLSM", "a.xlsb", "a.ods"] {
            assert_eq!(
                TemplateFormat::from_path(Path::new(name)).unwrap(),
                TemplateFormat::Workbook
            );
        }
        assert!(matches!(
            TemplateFormat::from_path(Path::new("template.txt")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            TemplateFormat::from_path(Path::new("template")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::String(String::new())), Cell::Empty);
        assert_eq!(cell_from_data(&Data::String("x".into())), Cell::text("x"));
        assert_eq!(cell_from_data(&Data::Int(4)), Cell::Number(4.0));
        assert_eq!(cell_from_data(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Bool(true));
        assert_eq!(
            cell_from_data(&Data::Error(CellErrorType::NA)),
            Cell::Error("#N/A".to_string())
        );
    }

    #[test]
    fn test_read_workbook_missing_file() {
        let result = read_workbook(Path::new("/nonexistent/template.xlsx"));
        assert!(matches!(result, Err(IngestError::FileRead { .. })));
    }

    #[test]
    fn test_read_workbook_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();
        assert!(matches!(
            read_workbook(&path),
            Err(IngestError::Workbook { .. })
        ));
    }
}
