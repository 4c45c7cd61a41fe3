//! Filter option resolver
//!
//! Distinct values per filterable dimension, for populating the filter
//! bar. This scans the whole store, so results are cached for a bounded
//! TTL; the values are advisory and may lag the store by up to that TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use crate::errors::DashboardResult;
use crate::query::AgeBucket;
use crate::sales::Field;
use crate::store::RecordStore;

use super::response::FilterOptions;

/// Resolves (and caches) filter options
pub struct FilterOptionResolver {
    store: Arc<dyn RecordStore>,
    cache: Option<Cache<(), FilterOptions>>,
}

impl FilterOptionResolver {
    /// Create a resolver; a zero TTL disables caching
    pub fn new(store: Arc<dyn RecordStore>, ttl: Duration) -> Self {
        let cache = (!ttl.is_zero()).then(|| Cache::builder().max_capacity(1).time_to_live(ttl).build());
        Self { store, cache }
    }

    /// Current filter options, from cache when fresh
    pub fn resolve(&self) -> DashboardResult<FilterOptions> {
        if let Some(options) = self.cache.as_ref().and_then(|cache| cache.get(&())) {
            return Ok(options);
        }

        let options = self.compute()?;
        if let Some(cache) = &self.cache {
            cache.insert((), options.clone());
        }
        Ok(options)
    }

    fn compute(&self) -> DashboardResult<FilterOptions> {
        let tags = self
            .store
            .all_tag_sets()?
            .into_iter()
            .flatten()
            .filter(|tag| !tag.is_empty())
            .collect();

        let options = FilterOptions {
            customer_region: self.store.distinct_values(Field::CustomerRegion)?,
            gender: self.store.distinct_values(Field::Gender)?,
            product_category: self.store.distinct_values(Field::ProductCategory)?,
            payment_method: self.store.distinct_values(Field::PaymentMethod)?,
            tags,
            age_ranges: AgeBucket::labels(),
        };

        debug!(
            regions = options.customer_region.len(),
            tags = options.tags.len(),
            "filter options computed"
        );
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::errors::DashboardError;
    use crate::query::{OrderBy, PredicateSet};
    use crate::sales::SalesRecord;
    use crate::store::{StoreError, StoreResult};

    /// Store double that serves fixed values and counts scans
    #[derive(Default)]
    struct FixedStore {
        scans: AtomicUsize,
        fail: bool,
    }

    impl RecordStore for FixedStore {
        fn count(&self, _predicates: &PredicateSet) -> StoreResult<usize> {
            Ok(0)
        }

        fn fetch(
            &self,
            _predicates: &PredicateSet,
            _order: &OrderBy,
            _offset: usize,
            _limit: usize,
        ) -> StoreResult<Vec<SalesRecord>> {
            Ok(Vec::new())
        }

        fn distinct_values(&self, field: Field) -> StoreResult<BTreeSet<String>> {
            if self.fail {
                return Err(StoreError::Unavailable("down".to_string()));
            }
            Ok([format!("{}-value", field)].into_iter().collect())
        }

        fn all_tag_sets(&self) -> StoreResult<Vec<BTreeSet<String>>> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                ["Premium".to_string(), "".to_string()].into_iter().collect(),
                ["Premium".to_string(), "New Arrival".to_string()].into_iter().collect(),
                BTreeSet::new(),
            ])
        }
    }

    #[test]
    fn test_resolve_unions_tags_and_fixes_age_ranges() {
        let resolver = FilterOptionResolver::new(Arc::new(FixedStore::default()), Duration::ZERO);
        let options = resolver.resolve().unwrap();

        assert_eq!(
            options.tags.into_iter().collect::<Vec<_>>(),
            vec!["New Arrival", "Premium"]
        );
        assert_eq!(options.age_ranges, vec!["18-25", "26-35", "36-45", "46-55", "55+"]);
        assert!(options.customer_region.contains("customerRegion-value"));
    }

    #[test]
    fn test_cache_avoids_rescan() {
        let store = Arc::new(FixedStore::default());
        let resolver = FilterOptionResolver::new(store.clone(), Duration::from_secs(60));

        resolver.resolve().unwrap();
        resolver.resolve().unwrap();
        assert_eq!(store.scans.load(Ordering::SeqCst), 1);

    }

    #[test]
    fn test_cache_expires_after_ttl() {
        let store = Arc::new(FixedStore::default());
        let resolver = FilterOptionResolver::new(store.clone(), Duration::from_millis(50));

        resolver.resolve().unwrap();
        std::thread::sleep(Duration::from_millis(150));
        resolver.resolve().unwrap();
        assert_eq!(store.scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_zero_ttl_always_rescans() {
        let store = Arc::new(FixedStore::default());
        let resolver = FilterOptionResolver::new(store.clone(), Duration::ZERO);

        resolver.resolve().unwrap();
        resolver.resolve().unwrap();
        assert_eq!(store.scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = Arc::new(FixedStore {
            fail: true,
            ..Default::default()
        });
        let resolver = FilterOptionResolver::new(store, Duration::ZERO);

        assert!(matches!(resolver.resolve(), Err(DashboardError::StoreUnavailable(_))));
    }
}
