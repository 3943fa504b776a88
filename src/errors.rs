use thiserror::Error;

/// Errors produced by the entry engine
///
/// Unknown atmosphere-model or backend names are deliberately not errors:
/// they log a warning and substitute the documented default instead.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to read density table {path}: {source}")]
    TableLoad {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed density table {path}, line {line}: {reason}")]
    TableParse {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("integration did not reach a stop condition within {steps} steps")]
    NonConvergence { steps: usize },

    #[error("degenerate trajectory: {0}")]
    Degenerate(String),
}
