//! # Query Builder
//!
//! Pure translation of a dashboard request into a `QuerySpec`:
//! predicate set, ordering, and offset/limit. No store access happens
//! here, so everything is deterministic and testable in isolation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{DashboardError, DashboardResult};
use crate::sales::Field;

use super::criteria::{FilterCriteria, SummaryCriteria};
use super::predicate::{Predicate, PredicateSet};
use super::request::SalesQuery;

/// Default page size if not specified
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes above this are clamped
pub const MAX_PAGE_SIZE: usize = 100;

/// How the age-bucket condition combines with the free-text search.
///
/// `Legacy` places both in one top-level OR, so a search term together
/// with an age selection returns the union of both matches.
/// `Conjunctive` ANDs the two groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeSearchMode {
    #[default]
    Legacy,
    Conjunctive,
}

/// Requested sort key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CustomerName,
    Date,
    DateNewest,
    DateOldest,
    Quantity,
}

impl SortKey {
    /// Parse a sort key; unrecognized keys fall back to `CustomerName`
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("date") => SortKey::Date,
            Some("dateNewest") => SortKey::DateNewest,
            Some("dateOldest") => SortKey::DateOldest,
            Some("quantity") => SortKey::Quantity,
            _ => SortKey::CustomerName,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Descending only when the request says exactly "desc"
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Record column used for ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderField {
    CustomerName,
    Date,
    Quantity,
}

/// Order by clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub field: OrderField,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn new(field: OrderField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Resolve the requested key and direction into a concrete ordering
    pub fn resolve(key: SortKey, direction: SortDirection) -> Self {
        match key {
            SortKey::DateNewest => Self::new(OrderField::Date, SortDirection::Desc),
            SortKey::DateOldest => Self::new(OrderField::Date, SortDirection::Asc),
            SortKey::Date => Self::new(OrderField::Date, direction),
            SortKey::Quantity => Self::new(OrderField::Quantity, direction),
            SortKey::CustomerName => Self::new(OrderField::CustomerName, direction),
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.direction == SortDirection::Asc
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::new(OrderField::CustomerName, SortDirection::Asc)
    }
}

/// Page bounds after validation and clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub offset: usize,
}

/// Fully built query for the record store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    pub predicates: PredicateSet,
    pub order: OrderBy,
    pub window: PageWindow,
}

impl QuerySpec {
    pub fn offset(&self) -> usize {
        self.window.offset
    }

    pub fn limit(&self) -> usize {
        self.window.page_size
    }
}

/// Builder limits and composition policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLimits {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    #[serde(default = "max_page_size")]
    pub max_page_size: usize,

    #[serde(default)]
    pub age_search_mode: AgeSearchMode,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn max_page_size() -> usize {
    MAX_PAGE_SIZE
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            age_search_mode: AgeSearchMode::default(),
        }
    }
}

/// Translates dashboard requests into query specifications
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder {
    limits: QueryLimits,
}

impl QueryBuilder {
    pub fn new(limits: QueryLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    /// Build the full query specification for a records request
    pub fn build(&self, query: &SalesQuery) -> DashboardResult<QuerySpec> {
        let predicates = self.filter_predicates(&query.search, &query.criteria);
        let order = OrderBy::resolve(
            SortKey::parse(query.sort_by.as_deref()),
            SortDirection::parse(query.sort_order.as_deref()),
        );
        let window = self.page_window(query.page, query.page_size)?;

        Ok(QuerySpec {
            predicates,
            order,
            window,
        })
    }

    /// Build the predicate portion only (search plus filters)
    pub fn filter_predicates(&self, search: &str, criteria: &FilterCriteria) -> PredicateSet {
        let mut set = PredicateSet::new();

        let search_group: Vec<Predicate> = if search.is_empty() {
            Vec::new()
        } else {
            vec![
                Predicate::contains_ignore_case(Field::CustomerName, search),
                Predicate::contains_ignore_case(Field::PhoneNumber, search),
            ]
        };

        let age_group: Vec<Predicate> = criteria
            .age_buckets()
            .into_iter()
            .map(|bucket| {
                let (min, max) = bucket.bounds();
                Predicate::AgeBetween { min, max }
            })
            .collect();

        match self.limits.age_search_mode {
            AgeSearchMode::Legacy => {
                let merged: Vec<Predicate> = search_group.into_iter().chain(age_group).collect();
                push_any(&mut set, merged);
            }
            AgeSearchMode::Conjunctive => {
                push_any(&mut set, search_group);
                push_any(&mut set, age_group);
            }
        }

        push_in_set(&mut set, Field::CustomerRegion, &criteria.customer_region);
        push_in_set(&mut set, Field::Gender, &criteria.gender);
        push_in_set(&mut set, Field::ProductCategory, &criteria.product_category);
        push_in_set(&mut set, Field::PaymentMethod, &criteria.payment_method);

        if !criteria.tags.is_empty() {
            set.push(Predicate::TagsIntersect {
                tags: criteria.tags.clone(),
            });
        }

        if let Some((start, end)) = criteria.date_range.bounds() {
            set.push(Predicate::DateBetween { start, end });
        }

        set
    }

    /// Build the predicates for the summary endpoint (region and category only)
    pub fn summary_predicates(&self, criteria: &SummaryCriteria) -> PredicateSet {
        let mut set = PredicateSet::new();
        push_in_set(&mut set, Field::CustomerRegion, &criteria.customer_region);
        push_in_set(&mut set, Field::ProductCategory, &criteria.product_category);
        set
    }

    /// Validate page numbers and compute the row offset.
    ///
    /// Missing values take the defaults; `page_size` above the maximum is clamped.
    pub fn page_window(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> DashboardResult<PageWindow> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(self.limits.default_page_size);

        if page == 0 {
            return Err(DashboardError::validation("page must be >= 1"));
        }
        if page_size == 0 {
            return Err(DashboardError::validation("pageSize must be >= 1"));
        }

        let page_size = page_size.min(self.limits.max_page_size);
        let offset = (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| DashboardError::validation(format!("page {} is out of range", page)))?;

        Ok(PageWindow {
            page,
            page_size,
            offset,
        })
    }
}

/// Add an OR group; a single alternative is added bare, none adds nothing
fn push_any(set: &mut PredicateSet, mut group: Vec<Predicate>) {
    match group.len() {
        0 => {}
        1 => set.push(group.remove(0)),
        _ => set.push(Predicate::AnyOf { predicates: group }),
    }
}

fn push_in_set(set: &mut PredicateSet, field: Field, values: &BTreeSet<String>) {
    if !values.is_empty() {
        set.push(Predicate::in_set(field, values.clone()));
    }
}
