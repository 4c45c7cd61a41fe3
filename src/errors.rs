//! # Dashboard Errors
//!
//! Error taxonomy shared by the query builder and the services.
//! Empty filters, empty searches and zero matches are normal outcomes,
//! never errors.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Dashboard errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Malformed request input (page, pageSize, dates)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The record store failed or returned malformed data; not retried
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    /// Fetch-then-reduce refused because the matching set is too large
    #[error("Summary scan of {matched} records exceeds limit {limit}")]
    ScanLimitExceeded { matched: usize, limit: usize },
}

impl DashboardError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the caller sent bad input, as opposed to a store failure
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DashboardError::StoreUnavailable(_))
    }
}

impl From<StoreError> for DashboardError {
    fn from(err: StoreError) -> Self {
        DashboardError::StoreUnavailable(err.to_string())
    }
}
