//! Source locations attached to ingestion errors.

use std::fmt;

/// A single spreadsheet cell, rendered A1-style with its sheet (`'Metadata Example'!B12`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub sheet: String,
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub column: usize,
}

impl CellRef {
    pub fn new(sheet: impl Into<String>, row: usize, column: usize) -> Self {
        Self {
            sheet: sheet.into(),
            row,
            column,
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}'!{}{}",
            self.sheet,
            column_letters(self.column),
            self.row + 1
        )
    }
}

/// Converts a zero-based column index to spreadsheet letters (0 -> A, 26 -> AA).
pub fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (column % 26) as u8);
        if column < 26 {
            break;
        }
        column = column / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Where a missing or malformed value was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A row of a relational table. `row` is 1-based within the fetched result set.
    Row {
        table: String,
        row: usize,
        key: Option<String>,
    },
    /// A single spreadsheet cell.
    Cell(CellRef),
    /// A named section of a sheet, for values that are absent altogether.
    Section {
        sheet: String,
        section: String,
        /// Sample name, when the section is the sample grid.
        entry: Option<String>,
    },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row {
                table,
                row,
                key: Some(key),
            } => write!(f, "table {table}, row {row} ({key})"),
            Self::Row {
                table,
                row,
                key: None,
            } => write!(f, "table {table}, row {row}"),
            Self::Cell(cell) => write!(f, "{cell}"),
            Self::Section {
                sheet,
                section,
                entry: Some(entry),
            } => write!(f, "'{sheet}' {section} section, sample {entry}"),
            Self::Section {
                sheet,
                section,
                entry: None,
            } => write!(f, "'{sheet}' {section} section"),
        }
    }
}

impl From<CellRef> for Location {
    fn from(cell: CellRef) -> Self {
        Self::Cell(cell)
    }
}
