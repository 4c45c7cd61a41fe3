//! Record store errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or the read failed
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store returned data that does not decode as sales records
    #[error("malformed store data: {0}")]
    Malformed(String),
}
