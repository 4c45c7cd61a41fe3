//! Metrics registry for the dashboard
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Metrics registry containing all operational counters
///
/// All counters use atomic operations with Relaxed ordering; exact
/// cross-counter consistency is not required.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Records queries answered
    records_queries: AtomicU64,
    /// Requests rejected for invalid input
    queries_rejected: AtomicU64,
    /// Requests failed by the record store
    store_failures: AtomicU64,
    /// Summaries computed
    summaries_computed: AtomicU64,
    /// Filter option lookups answered
    options_resolved: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_records_queries(&self) {
        self.records_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_failures(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_summaries(&self) {
        self.summaries_computed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_options_resolved(&self) {
        self.options_resolved.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_queries: self.records_queries.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            summaries_computed: self.summaries_computed.load(Ordering::Relaxed),
            options_resolved: self.options_resolved.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_queries: u64,
    pub queries_rejected: u64,
    pub store_failures: u64,
    pub summaries_computed: u64,
    pub options_resolved: u64,
}
