//! Error types for delivery ledger operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and hints.

use thiserror::Error;

use crate::record::PackageId;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Core error type for ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No record exists for the requested package ID.
    ///
    /// The message is fixed; the ID is carried for callers that want it.
    #[error("Delivery record not found")]
    NotFound(PackageId),

    /// The installed authorizer rejected the operation
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Data validation error (corrupt snapshot, bad stored JSON)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// True when this error reports a missing delivery record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Validation(err.to_string())
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        LedgerError::Storage(format!("SQLite error: {}", err))
    }
}
