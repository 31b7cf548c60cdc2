//! Read-only execution of generated SQL.
//!
//! The model's output is untrusted text. Before anything touches the
//! database the statement has to pass [`ensure_read_only`], and the
//! connection itself is opened with `SQLITE_OPEN_READ_ONLY` so even a
//! statement that slips past the keyword check cannot mutate the store.

use crate::error::{AskDbError, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use serde_json::Value as JsonValue;
use std::path::Path;

/// One result row: column name to scalar value, in result-set column order.
/// `serde_json`'s `preserve_order` feature keeps the map ordered.
pub type Row = serde_json::Map<String, JsonValue>;

/// Refuse anything that is not a single read-only statement.
///
/// Accepts one `SELECT` or `WITH` statement; rejects DML/DDL/PRAGMA and
/// multi-statement payloads, naming the offending leading keyword so the
/// error is attributable to the generated query.
pub fn ensure_read_only(sql: &str) -> Result<()> {
    let trimmed = sql.trim().trim_end_matches(';').trim();
    if trimmed.is_empty() {
        return Err(AskDbError::RejectedStatement("empty statement".to_string()));
    }
    if trimmed.contains(';') {
        return Err(AskDbError::RejectedStatement(
            "multiple statements in one request".to_string(),
        ));
    }

    let keyword: String = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();

    match keyword.as_str() {
        "SELECT" | "WITH" => Ok(()),
        other => Err(AskDbError::RejectedStatement(other.to_string())),
    }
}

/// Execute a generated SQL statement and collect all rows as keyed records.
///
/// Opens its own read-only connection per call and closes it on return.
/// A query returning zero rows yields an empty vector.
pub fn run_query(db_path: &Path, sql: &str) -> Result<Vec<Row>> {
    ensure_read_only(sql)?;

    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(AskDbError::Execution)?;
    let mut stmt = conn.prepare(sql).map_err(AskDbError::Execution)?;

    let column_names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let mut rows = stmt.query([]).map_err(AskDbError::Execution)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(AskDbError::Execution)? {
        let mut record = Row::new();
        for (idx, name) in column_names.iter().enumerate() {
            let value = row.get_ref(idx).map_err(AskDbError::Execution)?;
            record.insert(name.clone(), json_value(value));
        }
        records.push(record);
    }

    Ok(records)
}

fn json_value(value: ValueRef<'_>) -> JsonValue {
    match value {
        ValueRef::Null => JsonValue::Null,
        ValueRef::Integer(i) => JsonValue::from(i),
        // NaN/Infinity have no JSON representation; surface them as null
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        ValueRef::Text(t) => JsonValue::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => JsonValue::String(hex::encode(b)),
    }
}
