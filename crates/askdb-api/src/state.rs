//! Shared application state injected into handlers.

use askdb_core::QueryTranslator;
use std::path::PathBuf;

/// Per-process state shared across requests via `web::Data`.
///
/// Holds only the translator (which wraps the model client) and the database
/// path; every request opens its own connection, so there is no pool and no
/// cross-request mutable state.
pub struct AppState {
    pub translator: QueryTranslator,
    pub db_path: PathBuf,
}

impl AppState {
    pub fn new(translator: QueryTranslator, db_path: impl Into<PathBuf>) -> Self {
        Self {
            translator,
            db_path: db_path.into(),
        }
    }
}
