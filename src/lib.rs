//! salesdash - a filtered, searchable, paginated sales-records dashboard
//!
//! The query builder turns a dashboard request into a store-neutral
//! `QuerySpec`; the services run it against an injected `RecordStore`.

pub mod cli;
pub mod config;
pub mod errors;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod sales;
pub mod service;
pub mod store;

pub use errors::{DashboardError, DashboardResult};
