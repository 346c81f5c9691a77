//! Section header lookup and two-column field blocks.

use crate::error::{IngestError, Result};
use crate::location::{CellRef, Location};

use super::sheet::{Cell, Sheet};

/// Finds the first row at or after `start` whose cell in `column` is the
/// text `header`, compared exactly.
pub fn find_header_row_from<S: Sheet + ?Sized>(
    sheet: &S,
    header: &str,
    column: usize,
    start: usize,
) -> Option<usize> {
    let last = sheet.last_row()?;
    (start..=last).find(|row| {
        matches!(sheet.cell(*row, column), Some(Cell::Text(text)) if text == header)
    })
}

/// Finds the first row whose cell in `column` is the text `header`.
pub fn find_header_row<S: Sheet + ?Sized>(sheet: &S, header: &str, column: usize) -> Option<usize> {
    find_header_row_from(sheet, header, column, 0)
}

/// One `(field name, field value)` row of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub value: String,
    pub name_cell: CellRef,
    pub value_cell: CellRef,
}

/// Lazily reads field rows from a start row.
///
/// Stops at the first row whose name or value cell is missing or blank.
/// With [`FieldRows::skipping_blank_values`], a row with a blank value is
/// passed over instead and only a blank name ends the block. A name or value
/// holding only whitespace yields [`IngestError::EmptyFieldCell`] and ends
/// the sequence.
pub struct FieldRows<'a, S: ?Sized> {
    sheet: &'a S,
    row: usize,
    name_column: usize,
    value_column: usize,
    skip_blank_values: bool,
    done: bool,
}

enum RowRead {
    Entry(FieldEntry),
    Skip,
    End,
}

impl<'a, S: Sheet + ?Sized> FieldRows<'a, S> {
    pub fn new(sheet: &'a S, start: usize, name_column: usize, value_column: usize) -> Self {
        Self {
            sheet,
            row: start,
            name_column,
            value_column,
            skip_blank_values: false,
            done: false,
        }
    }

    /// Passes over rows whose value cell is blank instead of ending there.
    #[must_use]
    pub fn skipping_blank_values(mut self) -> Self {
        self.skip_blank_values = true;
        self
    }

    /// The row the next entry will be read from.
    pub fn position(&self) -> usize {
        self.row
    }

    fn read_row(&self) -> Result<RowRead> {
        let row = self.row;
        if self.sheet.is_blank(row, self.name_column) {
            return Ok(RowRead::End);
        }
        if self.sheet.is_blank(row, self.value_column) {
            return Ok(if self.skip_blank_values {
                RowRead::Skip
            } else {
                RowRead::End
            });
        }
        let Some(name) = self.sheet.text_at(row, self.name_column)? else {
            return Ok(RowRead::End);
        };
        let Some(value) = self.sheet.value_at(row, self.value_column)? else {
            return Ok(RowRead::End);
        };
        Ok(RowRead::Entry(FieldEntry {
            name,
            value,
            name_cell: self.sheet.cell_ref(row, self.name_column),
            value_cell: self.sheet.cell_ref(row, self.value_column),
        }))
    }
}

impl<S: Sheet + ?Sized> Iterator for FieldRows<'_, S> {
    type Item = Result<FieldEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done || self.sheet.last_row().is_none_or(|last| self.row > last) {
                return None;
            }
            match self.read_row() {
                Ok(RowRead::Entry(entry)) => {
                    self.row += 1;
                    return Some(Ok(entry));
                }
                Ok(RowRead::Skip) => {
                    tracing::trace!(row = self.row, "skipping field row without a value");
                    self.row += 1;
                }
                Ok(RowRead::End) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// The field entries of one section, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBlock {
    pub sheet: String,
    pub section: String,
    pub entries: Vec<FieldEntry>,
}

impl FieldBlock {
    /// Collects every entry of `rows` into a block.
    pub fn collect<S: Sheet + ?Sized>(section: &str, rows: FieldRows<'_, S>) -> Result<Self> {
        let sheet = rows.sheet.name().to_string();
        let entries = rows.collect::<Result<Vec<_>>>()?;
        tracing::debug!(section, entries = entries.len(), "collected field block");
        Ok(Self {
            sheet,
            section: section.to_string(),
            entries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct field names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.name.as_str()) {
                names.push(&entry.name);
            }
        }
        names
    }

    fn entries_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.name == name)
    }

    /// Every value recorded for `name`, in sheet order.
    pub fn values(&self, name: &str) -> Vec<String> {
        self.entries_for(name)
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// Rejects any field name outside `catalog`.
    pub fn check_names(&self, catalog: &[&str]) -> Result<()> {
        match self
            .entries
            .iter()
            .find(|entry| !catalog.contains(&entry.name.as_str()))
        {
            Some(entry) => Err(IngestError::UnknownField {
                section: self.section.clone(),
                field: entry.name.clone(),
                cell: entry.name_cell.clone(),
            }),
            None => Ok(()),
        }
    }

    /// A field that may appear at most once.
    pub fn optional_single(&self, name: &str) -> Result<Option<String>> {
        let entries: Vec<&FieldEntry> = self.entries_for(name).collect();
        match entries.as_slice() {
            [] => Ok(None),
            [entry] => Ok(Some(entry.value.clone())),
            [_, second, ..] => Err(IngestError::UnexpectedMultipleValues {
                field: name.to_string(),
                count: entries.len(),
                location: Location::Cell(second.value_cell.clone()),
            }),
        }
    }

    /// A field that must appear exactly once.
    pub fn required_single(&self, name: &str) -> Result<String> {
        self.optional_single(name)?
            .ok_or_else(|| IngestError::MissingRequiredField {
                field: name.to_string(),
                location: Location::Section {
                    sheet: self.sheet.clone(),
                    section: self.section.clone(),
                    entry: None,
                },
            })
    }
}
