//! # Record Store
//!
//! Read-only access to sales records. The services depend only on the
//! `RecordStore` trait, so any backend (or a test double) can be injected.

mod errors;
mod memory;
mod record_store;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryRecordStore;
pub use record_store::{RecordStore, SummaryTotals};
