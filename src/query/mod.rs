//! # Query Module
//!
//! Turns a filter/search/sort/page request into a store-neutral
//! `QuerySpec`. Pure and side-effect free.

pub mod builder;
pub mod criteria;
pub mod predicate;
pub mod request;

pub use builder::{
    AgeSearchMode, OrderBy, OrderField, PageWindow, QueryBuilder, QueryLimits, QuerySpec,
    SortDirection, SortKey, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use criteria::{AgeBucket, DateRange, FilterCriteria, SummaryCriteria};
pub use predicate::{Predicate, PredicateSet};
pub use request::SalesQuery;
