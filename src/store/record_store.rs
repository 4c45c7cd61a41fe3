//! Record store interface

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::query::{OrderBy, PredicateSet};
use crate::sales::{Field, SalesRecord};

use super::errors::StoreResult;

/// Aggregate totals over a filtered subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryTotals {
    pub total_units: u64,
    pub total_revenue: Decimal,
    pub total_sales: u64,
}

impl SummaryTotals {
    /// Fold one record into the totals
    pub fn add(&mut self, record: &SalesRecord) {
        self.total_units += u64::from(record.quantity);
        self.total_revenue += record.final_amount;
        self.total_sales += 1;
    }
}

/// Read-only sales record store.
///
/// Implementations must support equality-in-set, case-insensitive
/// substring, numeric range, tag intersection and inclusive datetime
/// range predicates, i.e. every `Predicate` variant.
pub trait RecordStore: Send + Sync {
    /// Count records matching all predicates
    fn count(&self, predicates: &PredicateSet) -> StoreResult<usize>;

    /// Fetch one ordered window of matching records
    fn fetch(
        &self,
        predicates: &PredicateSet,
        order: &OrderBy,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<SalesRecord>>;

    /// Distinct non-empty values of a string field
    fn distinct_values(&self, field: Field) -> StoreResult<BTreeSet<String>>;

    /// The tag set of every record
    fn all_tag_sets(&self) -> StoreResult<Vec<BTreeSet<String>>>;

    /// Store-side aggregation.
    ///
    /// `Ok(None)` means the store cannot aggregate and the caller must
    /// fetch and reduce itself.
    fn summarize(&self, _predicates: &PredicateSet) -> StoreResult<Option<SummaryTotals>> {
        Ok(None)
    }
}
