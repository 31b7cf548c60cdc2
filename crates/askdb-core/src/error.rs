// Error types module
use thiserror::Error;

/// Main error type for AskDB.
///
/// Variants split along the boundaries of the request pipeline so the HTTP
/// layer can map each failure class to a status code without string matching.
#[derive(Error, Debug)]
pub enum AskDbError {
    /// Reading table/column metadata from the database catalog failed.
    #[error("schema read failed: {0}")]
    Schema(#[source] rusqlite::Error),

    /// The generative model was unreachable or returned an unusable reply.
    #[error("model translation failed: {0}")]
    Translation(String),

    /// The generated statement was refused before execution.
    #[error("refusing to execute non read-only statement: {0}")]
    RejectedStatement(String),

    /// The generated SQL failed during execution.
    #[error("{0}")]
    Execution(#[source] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AskDbError {
    /// True when the failure is attributable to the generated query itself,
    /// i.e. the client-error class (HTTP 400). Everything else is the
    /// server-error class (HTTP 500).
    pub fn is_query_fault(&self) -> bool {
        matches!(self, AskDbError::Execution(_) | AskDbError::RejectedStatement(_))
    }
}

pub type Result<T> = std::result::Result<T, AskDbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_errors_are_query_faults() {
        let err = AskDbError::Execution(rusqlite::Error::InvalidQuery);
        assert!(err.is_query_fault());

        let err = AskDbError::RejectedStatement("INSERT".to_string());
        assert!(err.is_query_fault());
    }

    #[test]
    fn pipeline_errors_are_not_query_faults() {
        let err = AskDbError::Translation("quota exceeded".to_string());
        assert!(!err.is_query_fault());

        let err = AskDbError::Schema(rusqlite::Error::InvalidQuery);
        assert!(!err.is_query_fault());
    }
}
