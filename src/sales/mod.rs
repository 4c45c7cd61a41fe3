//! # Sales Records
//!
//! The read-only transaction model served by the dashboard.

mod record;

pub use record::{Field, SalesRecord};
