//! # HTTP Error Mapping
//!
//! Maps dashboard errors onto status codes and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::errors::DashboardError;

impl DashboardError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::ScanLimitExceeded { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message shown to dashboard users
    fn public_message(&self) -> &'static str {
        match self {
            DashboardError::Validation(_) => "Invalid request",
            DashboardError::ScanLimitExceeded { .. } => "Selection too large to summarize",
            DashboardError::StoreUnavailable(_) => "Failed to read sales data",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
            code: status.as_u16(),
        }
    }
}

impl From<&DashboardError> for ErrorResponse {
    fn from(err: &DashboardError) -> Self {
        Self::new(err.status_code(), err.public_message(), err.to_string())
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
