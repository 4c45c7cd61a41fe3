//! Observability for the dashboard
//!
//! - Structured logging through `tracing` (pretty or JSON lines)
//! - Monotonic operational counters
//!
//! # Usage
//!
//! ```ignore
//! use salesdash::observability::{init_tracing, LogFormat, MetricsRegistry};
//!
//! init_tracing(LogFormat::Json);
//! let metrics = MetricsRegistry::new();
//! metrics.increment_records_queries();
//! ```

mod metrics;

pub use metrics::{MetricsRegistry, MetricsSnapshot};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,tower_http=info";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for terminals
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    // Already installed (e.g. by a test harness)
    let _ = result;
}
