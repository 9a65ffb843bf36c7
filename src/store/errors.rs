//! # Store Errors
//!
//! Error types for the execution adapter.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by the SQLite store.
///
/// Execution failures carry SQLite's own message verbatim; the gateway
/// passes it through to the caller without interpretation and never
/// retries.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or its schema could not be
    /// created. Fatal at startup: the process must not serve traffic.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// The store rejected a statement (syntax error, constraint
    /// violation, I/O failure).
    #[error("{0}")]
    Execution(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Execution(err.to_string())
    }
}
