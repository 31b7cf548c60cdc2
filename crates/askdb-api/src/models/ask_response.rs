//! Success envelope for the `/ask` endpoint.

use askdb_core::Row;
use serde::{Deserialize, Serialize};

/// Response envelope pairing the original question with the generated SQL
/// and its result rows.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    /// The caller's question, echoed verbatim.
    pub question: String,
    /// The fence-stripped SQL statement produced by the model.
    pub generated_sql_query: String,
    /// Result rows as keyed records in result-set column order.
    /// Always present; a zero-row query yields an empty array.
    pub answer: Vec<Row>,
}
