//! GEOmetadb SQLite snapshot access.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Params, params, params_from_iter};

use crate::error::Result;

use super::names;
use super::source::{MetadataSource, RawRow};

/// A GEOmetadb snapshot opened through SQLite.
///
/// Every query binds its identifiers as parameters. Integer, real and blob
/// cells are rendered as text.
pub struct SqliteSource {
    connection: Connection,
}

impl SqliteSource {
    /// Opens a snapshot file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!(path = %path.display(), "opened GEOmetadb snapshot");
        Ok(Self { connection })
    }

    /// Wraps an already open connection.
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    fn query_rows(&self, sql: &str, params: impl Params) -> Result<Vec<RawRow>> {
        let mut statement = self.connection.prepare(sql)?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = statement.query(params)?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut raw = RawRow::new();
            for (index, column) in columns.iter().enumerate() {
                raw.insert(column.clone(), render_value(row.get_ref(index)?));
            }
            result.push(raw);
        }
        Ok(result)
    }
}

fn render_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(v) => Some(v.to_string()),
        ValueRef::Real(v) => Some(v.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

// Ids are trimmed on read, so lookups compare against trimmed columns.
impl MetadataSource for SqliteSource {
    fn series_ids(&self) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT {} FROM {}",
            names::SERIES_GSE,
            names::SERIES_TABLE
        );
        let rows = self.query_rows(&sql, [])?;
        Ok(rows
            .into_iter()
            .filter_map(|mut row| row.remove(names::SERIES_GSE).flatten())
            .map(|gse| gse.trim().to_string())
            .filter(|gse| !gse.is_empty())
            .collect())
    }

    fn sample_rows(&self, series_ids: &[String]) -> Result<Vec<RawRow>> {
        if series_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; series_ids.len()].join(", ");
        let sql = format!(
            "SELECT * FROM {} WHERE trim({}) IN ({placeholders})",
            names::SAMPLE_TABLE,
            names::SAMPLE_SERIES_ID
        );
        let rows = self.query_rows(&sql, params_from_iter(series_ids.iter()))?;
        tracing::debug!(
            series = series_ids.len(),
            rows = rows.len(),
            "fetched sample rows"
        );
        Ok(rows)
    }

    fn series_rows(&self, series_id: &str) -> Result<Vec<RawRow>> {
        let sql = format!(
            "SELECT * FROM {} WHERE trim({}) = ?1",
            names::SERIES_TABLE,
            names::SERIES_GSE
        );
        self.query_rows(&sql, params![series_id])
    }

    fn platform_rows(&self, platform_id: &str) -> Result<Vec<RawRow>> {
        let sql = format!(
            "SELECT * FROM {} WHERE trim({}) = ?1",
            names::PLATFORM_TABLE,
            names::PLATFORM_GPL
        );
        self.query_rows(&sql, params![platform_id])
    }
}
