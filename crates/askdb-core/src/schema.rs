//! Live schema inspection for the SQLite database.
//!
//! The schema is re-read on every request rather than cached: the database
//! file is an external store that can be swapped underneath the server, and
//! the catalog query is cheap compared to the model round-trip.

use crate::error::{AskDbError, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// One column of a user table: name plus the declared SQLite type
/// (e.g. `INTEGER`, `REAL`, `TEXT`). The declared type may be empty for
/// typeless columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
}

/// A table with its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

/// Ordered table/column metadata for the whole database.
///
/// A database with zero user tables yields an empty schema, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSchema {
    tables: Vec<TableSchema>,
}

impl DatabaseSchema {
    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Render the schema as prompt text for the model:
    ///
    /// ```text
    /// Table 'total_sales':
    ///   - date (TEXT)
    ///   - total_sales (REAL)
    /// ```
    pub fn to_prompt_text(&self) -> String {
        let mut out = String::new();
        for table in &self.tables {
            out.push_str(&format!("Table '{}':\n", table.name));
            for column in &table.columns {
                out.push_str(&format!("  - {} ({})\n", column.name, column.declared_type));
            }
        }
        out
    }
}

/// Read table and column metadata from the database catalog.
///
/// Enumerates `sqlite_master` for user tables (internal `sqlite_*` tables are
/// skipped) and runs `PRAGMA table_info` per table. Opens and closes its own
/// read-only connection per call.
pub fn read_schema(db_path: &Path) -> Result<DatabaseSchema> {
    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(AskDbError::Schema)?;

    let table_names: Vec<String> = {
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .map_err(AskDbError::Schema)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(AskDbError::Schema)?;
        rows.collect::<std::result::Result<_, _>>().map_err(AskDbError::Schema)?
    };

    let mut tables = Vec::with_capacity(table_names.len());
    for name in table_names {
        // Table names come from the catalog itself; quoting guards against
        // names containing spaces or keywords.
        let pragma = format!("PRAGMA table_info(\"{}\")", name.replace('"', "\"\""));
        let mut stmt = conn.prepare(&pragma).map_err(AskDbError::Schema)?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    name: row.get::<_, String>(1)?,
                    declared_type: row.get::<_, String>(2)?,
                })
            })
            .map_err(AskDbError::Schema)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(AskDbError::Schema)?;
        tables.push(TableSchema { name, columns });
    }

    Ok(DatabaseSchema { tables })
}
