//! # HTTP Server Module
//!
//! Axum server exposing the dashboard JSON contracts.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/sales` - Records with search, filters, sorting, pagination
//! - `/api/sales/filters/options` - Filter control values
//! - `/api/sales/summary` - Summary statistics
//! - `/observability/metrics` - Counters

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod sales_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::ErrorResponse;
pub use server::HttpServer;
