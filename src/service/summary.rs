//! Summary aggregator
//!
//! Totals over records matching a region/category filter. Search, other
//! filters and pagination do not apply here.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{DashboardError, DashboardResult};
use crate::query::{OrderBy, QueryBuilder, SummaryCriteria};
use crate::store::{RecordStore, SummaryTotals};

use super::response::SalesSummary;

/// Maximum number of records reduced in-process when the store cannot aggregate
pub const DEFAULT_SCAN_LIMIT: usize = 100_000;

/// Computes summary statistics
pub struct SummaryAggregator {
    store: Arc<dyn RecordStore>,
    builder: QueryBuilder,
    scan_limit: usize,
}

impl SummaryAggregator {
    pub fn new(store: Arc<dyn RecordStore>, builder: QueryBuilder, scan_limit: usize) -> Self {
        Self {
            store,
            builder,
            scan_limit,
        }
    }

    /// Compute totals for the given criteria.
    ///
    /// Prefers store-side aggregation and falls back to fetch-then-reduce,
    /// refusing sets larger than the scan limit.
    pub fn summarize(&self, criteria: &SummaryCriteria) -> DashboardResult<SalesSummary> {
        let predicates = self.builder.summary_predicates(criteria);

        let totals = match self.store.summarize(&predicates)? {
            Some(totals) => totals,
            None => {
                let matched = self.store.count(&predicates)?;
                if matched > self.scan_limit {
                    warn!(matched, limit = self.scan_limit, "summary scan refused");
                    return Err(DashboardError::ScanLimitExceeded {
                        matched,
                        limit: self.scan_limit,
                    });
                }

                let records = self
                    .store
                    .fetch(&predicates, &OrderBy::default(), 0, matched)?;
                records.iter().fold(SummaryTotals::default(), |mut totals, record| {
                    totals.add(record);
                    totals
                })
            }
        };

        debug!(total_sales = totals.total_sales, "summary computed");
        Ok(SalesSummary::from(totals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use crate::query::PredicateSet;
    use crate::sales::{Field, SalesRecord};
    use crate::store::{InMemoryRecordStore, StoreResult};

    fn record(id: &str, region: &str, category: &str, quantity: u32, final_amount: i64) -> SalesRecord {
        SalesRecord {
            transaction_id: id.to_string(),
            date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            customer_id: "C".to_string(),
            customer_name: "Name".to_string(),
            phone_number: "1".to_string(),
            gender: "Other".to_string(),
            age: 40,
            customer_region: region.to_string(),
            product_category: category.to_string(),
            tags: BTreeSet::new(),
            quantity,
            price_per_unit: Decimal::from(final_amount),
            discount_percentage: Decimal::ZERO,
            total_amount: Decimal::from(final_amount),
            final_amount: Decimal::from(final_amount),
            payment_method: "UPI".to_string(),
        }
    }

    fn store() -> Arc<InMemoryRecordStore> {
        Arc::new(InMemoryRecordStore::new(vec![
            record("T1", "North", "Clothing", 2, 100),
            record("T2", "North", "Electronics", 1, 300),
            record("T3", "South", "Clothing", 5, 50),
        ]))
    }

    fn criteria(regions: &[&str], categories: &[&str]) -> SummaryCriteria {
        SummaryCriteria {
            customer_region: regions.iter().map(|s| s.to_string()).collect(),
            product_category: categories.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_summary_over_region() {
        let aggregator = SummaryAggregator::new(store(), QueryBuilder::default(), DEFAULT_SCAN_LIMIT);
        let summary = aggregator.summarize(&criteria(&["North"], &[])).unwrap();

        assert_eq!(summary.total_units, 3);
        assert_eq!(summary.total_revenue, Decimal::from(400));
        assert_eq!(summary.total_sales, 2);
        assert_eq!(summary.avg_order_value, Decimal::from(200));
    }

    #[test]
    fn test_summary_region_and_category() {
        let aggregator = SummaryAggregator::new(store(), QueryBuilder::default(), DEFAULT_SCAN_LIMIT);
        let summary = aggregator.summarize(&criteria(&["North"], &["Clothing"])).unwrap();

        assert_eq!(summary.total_sales, 1);
        assert_eq!(summary.total_units, 2);
    }

    #[test]
    fn test_summary_no_matches() {
        let aggregator = SummaryAggregator::new(store(), QueryBuilder::default(), DEFAULT_SCAN_LIMIT);
        let summary = aggregator.summarize(&criteria(&["West"], &[])).unwrap();

        assert_eq!(summary.total_sales, 0);
        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.avg_order_value, Decimal::ZERO);
    }

    #[test]
    fn test_scan_limit() {
        let aggregator = SummaryAggregator::new(store(), QueryBuilder::default(), 2);
        let result = aggregator.summarize(&SummaryCriteria::default());

        assert_eq!(
            result,
            Err(DashboardError::ScanLimitExceeded { matched: 3, limit: 2 })
        );
    }

    /// Store that aggregates natively and must never be scanned
    struct AggregatingStore;

    impl RecordStore for AggregatingStore {
        fn count(&self, _predicates: &PredicateSet) -> StoreResult<usize> {
            panic!("count must not be called");
        }

        fn fetch(
            &self,
            _predicates: &PredicateSet,
            _order: &OrderBy,
            _offset: usize,
            _limit: usize,
        ) -> StoreResult<Vec<SalesRecord>> {
            panic!("fetch must not be called");
        }

        fn distinct_values(&self, _field: Field) -> StoreResult<BTreeSet<String>> {
            Ok(BTreeSet::new())
        }

        fn all_tag_sets(&self) -> StoreResult<Vec<BTreeSet<String>>> {
            Ok(Vec::new())
        }

        fn summarize(&self, _predicates: &PredicateSet) -> StoreResult<Option<SummaryTotals>> {
            Ok(Some(SummaryTotals {
                total_units: 10,
                total_revenue: Decimal::from(1000),
                total_sales: 4,
            }))
        }
    }

    #[test]
    fn test_store_side_aggregation_bypasses_scan() {
        let aggregator = SummaryAggregator::new(Arc::new(AggregatingStore), QueryBuilder::default(), 1);
        let summary = aggregator.summarize(&SummaryCriteria::default()).unwrap();

        assert_eq!(summary.total_sales, 4);
        assert_eq!(summary.avg_order_value, Decimal::from(250));
    }
}
