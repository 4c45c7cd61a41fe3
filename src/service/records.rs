//! Record service: one page of records plus pagination metadata

use std::sync::Arc;

use tracing::debug;

use crate::errors::DashboardResult;
use crate::query::{PredicateSet, QueryBuilder, QuerySpec, SalesQuery};
use crate::store::RecordStore;

use super::response::{PaginationMeta, SalesPage};

/// Executes records queries against the store
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    builder: QueryBuilder,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>, builder: QueryBuilder) -> Self {
        Self { store, builder }
    }

    /// Build and execute a records request
    pub fn query(&self, query: &SalesQuery) -> DashboardResult<SalesPage> {
        let spec = self.builder.build(query)?;
        self.execute(&spec)
    }

    /// Number of records in the store, unfiltered
    pub fn total(&self) -> DashboardResult<usize> {
        Ok(self.store.count(&PredicateSet::new())?)
    }

    /// Execute an already built query.
    ///
    /// Count and fetch are two separate reads with the same predicates;
    /// they are not taken from one snapshot, so concurrent writes to the
    /// store can make `totalCount` disagree with the page.
    pub fn execute(&self, spec: &QuerySpec) -> DashboardResult<SalesPage> {
        let total_count = self.store.count(&spec.predicates)?;
        let data = self
            .store
            .fetch(&spec.predicates, &spec.order, spec.offset(), spec.limit())?;

        let pagination = PaginationMeta::new(spec.window.page, spec.window.page_size, total_count);
        debug!(
            page = pagination.page,
            page_size = pagination.page_size,
            total_count,
            returned = data.len(),
            "records query executed"
        );

        Ok(SalesPage { data, pagination })
    }
}
