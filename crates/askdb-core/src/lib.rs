//! Core pipeline for AskDB: schema reading, question-to-SQL translation,
//! and read-only query execution against a local SQLite database.

pub mod error;
pub mod executor;
pub mod llm;
pub mod schema;
pub mod translator;

pub use error::{AskDbError, Result};
pub use executor::{run_query, Row};
pub use llm::{strip_code_fences, TextGenerator};
pub use schema::{read_schema, ColumnInfo, DatabaseSchema, TableSchema};
pub use translator::QueryTranslator;
