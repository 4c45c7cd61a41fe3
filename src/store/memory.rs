//! In-memory record store
//!
//! Holds the whole dataset behind a `RwLock` and evaluates predicates
//! record by record. Suitable for datasets that fit in memory.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard};

use tracing::info;

use crate::query::{OrderBy, OrderField, PredicateSet};
use crate::sales::{Field, SalesRecord};

use super::errors::{StoreError, StoreResult};
use super::record_store::RecordStore;

/// In-memory record store
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<SalesRecord>>,
}

impl InMemoryRecordStore {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Load a JSON array of sales records
    pub fn load_json(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::Unavailable(format!("failed to read {}: {}", path.display(), e))
        })?;

        let store = Self::from_json_str(&content)?;
        info!(path = %path.display(), records = store.len(), "loaded sales dataset");
        Ok(store)
    }

    /// Parse a JSON array of sales records
    pub fn from_json_str(content: &str) -> StoreResult<Self> {
        let records: Vec<SalesRecord> =
            serde_json::from_str(content).map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(Self::new(records))
    }

    /// Number of records held; 0 if the lock is poisoned
    pub fn len(&self) -> usize {
        self.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<SalesRecord>>> {
        self.records
            .read()
            .map_err(|_| StoreError::Unavailable("Lock poisoned".to_string()))
    }
}

/// Compare two records by the requested ordering, ties broken by
/// transaction id so pages are stable.
fn compare(a: &SalesRecord, b: &SalesRecord, order: &OrderBy) -> Ordering {
    let primary = match order.field {
        OrderField::CustomerName => a.customer_name.cmp(&b.customer_name),
        OrderField::Date => a.date.cmp(&b.date),
        OrderField::Quantity => a.quantity.cmp(&b.quantity),
    };
    let primary = if order.is_ascending() {
        primary
    } else {
        primary.reverse()
    };

    primary.then_with(|| a.transaction_id.cmp(&b.transaction_id))
}

impl RecordStore for InMemoryRecordStore {
    fn count(&self, predicates: &PredicateSet) -> StoreResult<usize> {
        let records = self.read()?;
        Ok(records.iter().filter(|r| predicates.matches(r)).count())
    }

    fn fetch(
        &self,
        predicates: &PredicateSet,
        order: &OrderBy,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<SalesRecord>> {
        let records = self.read()?;

        let mut matching: Vec<&SalesRecord> =
            records.iter().filter(|r| predicates.matches(r)).collect();
        matching.sort_by(|a, b| compare(a, b, order));

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn distinct_values(&self, field: Field) -> StoreResult<BTreeSet<String>> {
        let records = self.read()?;
        Ok(records
            .iter()
            .map(|r| field.value(r))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn all_tag_sets(&self) -> StoreResult<Vec<BTreeSet<String>>> {
        let records = self.read()?;
        Ok(records.iter().map(|r| r.tags.clone()).collect())
    }
}
