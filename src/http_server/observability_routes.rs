//! Observability HTTP Routes
//!
//! `/health` probes the record store; `/metrics` exposes the dashboard
//! counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::observability::MetricsSnapshot;
use crate::service::Dashboard;

/// Health check body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    fn up(record_count: usize) -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            record_count: Some(record_count),
            error: None,
        }
    }

    fn down(error: String) -> Self {
        Self {
            status: "unavailable",
            version: env!("CARGO_PKG_VERSION"),
            record_count: None,
            error: Some(error),
        }
    }
}

/// Liveness route, mounted at the root
pub fn health_routes(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(dashboard)
}

/// Metrics route, mounted under `/observability`
pub fn observability_routes(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .with_state(dashboard)
}

async fn health(State(dashboard): State<Arc<Dashboard>>) -> (StatusCode, Json<HealthResponse>) {
    match dashboard.record_count() {
        Ok(count) => (StatusCode::OK, Json(HealthResponse::up(count))),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::down(err.to_string())),
        ),
    }
}

async fn metrics(State(dashboard): State<Arc<Dashboard>>) -> Json<MetricsSnapshot> {
    Json(dashboard.metrics().snapshot())
}
