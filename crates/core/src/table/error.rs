use thiserror::Error;

/// Errors that can occur during table repository operations.
///
/// `NotFound` is a normal negative result for point lookups; it only becomes
/// an error when an operation requires the row to exist (update). The
/// repository never retries internally — retry policy belongs to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("{kind} not found: {row_key}")]
    NotFound {
        kind: &'static str,
        row_key: String,
    },
    #[error("{kind} version conflict: {row_key}")]
    Conflict {
        kind: &'static str,
        row_key: String,
    },
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type for table repository operations.
pub type Result<T> = std::result::Result<T, TableError>;
