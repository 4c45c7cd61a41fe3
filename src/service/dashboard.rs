//! Dashboard facade
//!
//! Wires the services to one injected store handle and records
//! per-request outcomes in the metrics registry. Requests are stateless;
//! the only shared pieces are the store, the options cache and counters.

use std::sync::Arc;

use tracing::{error, warn};

use crate::config::DashboardConfig;
use crate::errors::DashboardResult;
use crate::observability::MetricsRegistry;
use crate::query::{QueryBuilder, SalesQuery, SummaryCriteria};
use crate::store::RecordStore;

use super::options::FilterOptionResolver;
use super::records::RecordService;
use super::response::{FilterOptions, SalesPage, SalesSummary};
use super::summary::SummaryAggregator;

/// Entry point for every dashboard operation
pub struct Dashboard {
    records: RecordService,
    options: FilterOptionResolver,
    summary: SummaryAggregator,
    metrics: MetricsRegistry,
}

impl Dashboard {
    /// Create a dashboard over `store` using the limits in `config`
    pub fn new(store: Arc<dyn RecordStore>, config: &DashboardConfig) -> Self {
        let builder = QueryBuilder::new(config.query);

        Self {
            records: RecordService::new(store.clone(), builder),
            options: FilterOptionResolver::new(store.clone(), config.options_cache_ttl()),
            summary: SummaryAggregator::new(store, builder, config.summary_scan_limit),
            metrics: MetricsRegistry::new(),
        }
    }

    /// One page of records matching the request
    pub fn records(&self, query: &SalesQuery) -> DashboardResult<SalesPage> {
        let result = self.records.query(query);
        if result.is_ok() {
            self.metrics.increment_records_queries();
        }
        self.observe("records", result)
    }

    /// Values available for each filter control
    pub fn filter_options(&self) -> DashboardResult<FilterOptions> {
        let result = self.options.resolve();
        if result.is_ok() {
            self.metrics.increment_options_resolved();
        }
        self.observe("filter_options", result)
    }

    /// Aggregate statistics for a region/category selection
    pub fn summary(&self, criteria: &SummaryCriteria) -> DashboardResult<SalesSummary> {
        let result = self.summary.summarize(criteria);
        if result.is_ok() {
            self.metrics.increment_summaries();
        }
        self.observe("summary", result)
    }

    /// Total records in the store; doubles as a store liveness probe
    pub fn record_count(&self) -> DashboardResult<usize> {
        self.observe("record_count", self.records.total())
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Count and log failures
    fn observe<T>(&self, operation: &str, result: DashboardResult<T>) -> DashboardResult<T> {
        if let Err(err) = &result {
            if err.is_client_error() {
                self.metrics.increment_queries_rejected();
                warn!(operation, error = %err, "request rejected");
            } else {
                self.metrics.increment_store_failures();
                error!(operation, error = %err, "record store failure");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::errors::DashboardError;
    use crate::query::{OrderBy, PredicateSet};
    use crate::sales::{Field, SalesRecord};
    use crate::store::{InMemoryRecordStore, StoreError, StoreResult};

    struct DownStore;

    impl RecordStore for DownStore {
        fn count(&self, _predicates: &PredicateSet) -> StoreResult<usize> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn fetch(
            &self,
            _predicates: &PredicateSet,
            _order: &OrderBy,
            _offset: usize,
            _limit: usize,
        ) -> StoreResult<Vec<SalesRecord>> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn distinct_values(&self, _field: Field) -> StoreResult<BTreeSet<String>> {
            Err(StoreError::Malformed("bad row".to_string()))
        }

        fn all_tag_sets(&self) -> StoreResult<Vec<BTreeSet<String>>> {
            Err(StoreError::Malformed("bad row".to_string()))
        }
    }

    #[test]
    fn test_store_failures_are_counted() {
        let dashboard = Dashboard::new(Arc::new(DownStore), &DashboardConfig::new("unused.json"));

        let result = dashboard.records(&SalesQuery::default());
        assert!(matches!(result, Err(DashboardError::StoreUnavailable(_))));
        assert!(dashboard.filter_options().is_err());

        let snapshot = dashboard.metrics().snapshot();
        assert_eq!(snapshot.store_failures, 2);
        assert_eq!(snapshot.records_queries, 0);
    }

    #[test]
    fn test_rejections_are_counted() {
        let dashboard = Dashboard::new(
            Arc::new(InMemoryRecordStore::default()),
            &DashboardConfig::new("unused.json"),
        );

        let query = SalesQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(dashboard.records(&query), Err(DashboardError::Validation(_))));
        let zero_size = SalesQuery {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(dashboard.records(&zero_size).is_err());

        let page = dashboard.records(&SalesQuery::default()).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_pages, 0);

        let snapshot = dashboard.metrics().snapshot();
        assert_eq!(snapshot.queries_rejected, 2);
        assert_eq!(snapshot.records_queries, 1);
    }
}
