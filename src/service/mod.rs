//! # Dashboard Services
//!
//! Record listing, filter options and summary statistics over an
//! injected `RecordStore`.

mod dashboard;
mod options;
mod records;
mod response;
mod summary;

pub use dashboard::Dashboard;
pub use options::FilterOptionResolver;
pub use records::RecordService;
pub use response::{FilterOptions, PaginationMeta, SalesPage, SalesSummary};
pub use summary::{SummaryAggregator, DEFAULT_SCAN_LIMIT};
