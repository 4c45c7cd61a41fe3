//! # HTTP Server
//!
//! Assembles the dashboard API router and runs it on a tokio listener.
//!
//! | Path                         | Handler                  |
//! |------------------------------|--------------------------|
//! | `/health`                    | liveness                 |
//! | `/api/sales`                 | records page             |
//! | `/api/sales/filters/options` | filter option values     |
//! | `/api/sales/summary`         | summary statistics       |
//! | `/observability/metrics`     | counters                 |

use std::sync::Arc;

use axum::http::{Method, StatusCode, Uri};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service::Dashboard;

use super::config::HttpServerConfig;
use super::errors::ErrorResponse;
use super::observability_routes::{health_routes, observability_routes};
use super::sales_routes::sales_routes;

/// Dashboard API server
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, dashboard: Arc<Dashboard>) -> Self {
        let router = Router::new()
            .merge(health_routes(dashboard.clone()))
            .nest("/api/sales", sales_routes(dashboard.clone()))
            .nest("/observability", observability_routes(dashboard))
            .fallback(not_found)
            .layer(TraceLayer::new_for_http())
            .layer(config.cors_layer());

        Self { config, router }
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Consume the server, returning its router (used by in-process tests)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the listener fails
    pub async fn start(self) -> std::io::Result<()> {
        let addr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "sales dashboard listening");

        axum::serve(listener, self.router).await
    }
}

async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::NOT_FOUND;
    let body = ErrorResponse::new(status, "Not Found", format!("Route {} {} not found", method, uri));
    (status, Json(body))
}
