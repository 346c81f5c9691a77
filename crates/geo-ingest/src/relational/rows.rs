//! Table row extraction with primary-key checks.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{IngestError, Result};
use crate::location::Location;

use super::source::RawRow;

/// A source row reduced to its populated catalog columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub table: String,
    /// 1-based position in the result set.
    pub number: usize,
    pub key: String,
    /// Column name -> trimmed, non-empty value.
    pub values: BTreeMap<String, String>,
}

impl TableRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn location(&self) -> Location {
        Location::Row {
            table: self.table.clone(),
            row: self.number,
            key: Some(self.key.clone()),
        }
    }

    /// Returns the value of a column that must be populated.
    pub fn required(&self, column: &str) -> Result<&str> {
        self.get(column)
            .ok_or_else(|| IngestError::MissingRequiredField {
                field: column.to_string(),
                location: self.location(),
            })
    }

    pub fn optional(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_string)
    }
}

/// Reads `rows` into one [`TableRow`] per source row.
///
/// Only `columns` are kept. Values are trimmed and null or blank cells are
/// left out of the row map.
///
/// # Errors
///
/// - [`IngestError::MissingPrimaryKey`] if `primary_key` is null or blank on any row
/// - [`IngestError::DuplicateKey`] if the same trimmed key appears twice
pub fn extract_table_rows(
    rows: impl IntoIterator<Item = RawRow>,
    table: &str,
    primary_key: &str,
    columns: &[&str],
) -> Result<Vec<TableRow>> {
    let mut seen = BTreeSet::new();
    let mut extracted = Vec::new();

    for (index, raw) in rows.into_iter().enumerate() {
        let number = index + 1;
        let values: BTreeMap<String, String> = columns
            .iter()
            .filter_map(|column| {
                let value = raw.get(*column)?.as_deref()?.trim();
                (!value.is_empty()).then(|| ((*column).to_string(), value.to_string()))
            })
            .collect();

        let Some(key) = values.get(primary_key).cloned() else {
            return Err(IngestError::MissingPrimaryKey {
                table: table.to_string(),
                column: primary_key.to_string(),
                row: number,
            });
        };
        if !seen.insert(key.clone()) {
            return Err(IngestError::DuplicateKey {
                table: table.to_string(),
                column: primary_key.to_string(),
                key,
                row: number,
            });
        }

        extracted.push(TableRow {
            table: table.to_string(),
            number,
            key,
            values,
        });
    }

    tracing::debug!(table, rows = extracted.len(), "extracted table rows");
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relational::source::raw_row;

    const COLUMNS: &[&str] = &["gsm", "title", "description"];

    #[test]
    fn test_values_trimmed_and_empty_cells_elided() {
        let mut row = raw_row([("gsm", " GSM1 "), ("title", "  liver  "), ("description", "   ")]);
        row.insert("extra".to_string(), Some("ignored".to_string()));

        let rows = extract_table_rows([row], "gsm", "gsm", COLUMNS).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "GSM1");
        assert_eq!(rows[0].get("title"), Some("liver"));
        assert_eq!(rows[0].get("description"), None);
        assert_eq!(rows[0].get("extra"), None);
        assert_eq!(rows[0].values.len(), 2);
    }

    #[test]
    fn test_null_cells_elided() {
        let mut row = raw_row([("gsm", "GSM1")]);
        row.insert("title".to_string(), None);
        let rows = extract_table_rows([row], "gsm", "gsm", COLUMNS).unwrap();
        assert!(rows[0].get("title").is_none());
    }

    #[test]
    fn test_missing_primary_key() {
        let rows = vec![
            raw_row([("gsm", "GSM1")]),
            raw_row([("gsm", "  "), ("title", "no key")]),
        ];
        let result = extract_table_rows(rows, "gsm", "gsm", COLUMNS);
        assert!(matches!(
            result,
            Err(IngestError::MissingPrimaryKey { row: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_key_after_trimming() {
        let rows = vec![raw_row([("gsm", "GSM1")]), raw_row([("gsm", "GSM1 ")])];
        let result = extract_table_rows(rows, "gsm", "gsm", COLUMNS);
        assert!(matches!(
            result,
            Err(IngestError::DuplicateKey { ref key, row: 2, .. }) if key == "GSM1"
        ));
    }

    #[test]
    fn test_required_column_reports_location() {
        let rows = extract_table_rows([raw_row([("gsm", "GSM7")])], "gsm", "gsm", COLUMNS).unwrap();
        let err = rows[0].required("title").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"missing required field 'title' in table gsm, row 1 (GSM7)");
    }
}
