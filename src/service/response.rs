//! # Response Envelopes
//!
//! JSON contracts consumed by the dashboard UI.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::sales::SalesRecord;
use crate::store::SummaryTotals;

/// Pagination metadata, derived from the request window and the match count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, page_size: usize, total_count: usize) -> Self {
        let total_pages = total_count.div_ceil(page_size.max(1));
        Self {
            page,
            page_size,
            total_count,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// One page of records
#[derive(Debug, Clone, Serialize)]
pub struct SalesPage {
    pub data: Vec<SalesRecord>,
    pub pagination: PaginationMeta,
}

/// Values available for each filter control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub customer_region: BTreeSet<String>,
    pub gender: BTreeSet<String>,
    pub product_category: BTreeSet<String>,
    pub payment_method: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub age_ranges: Vec<String>,
}

/// Aggregate statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_units: u64,
    pub total_revenue: Decimal,
    pub total_sales: u64,
    pub avg_order_value: Decimal,
}

impl From<SummaryTotals> for SalesSummary {
    fn from(totals: SummaryTotals) -> Self {
        let avg_order_value = if totals.total_sales == 0 {
            Decimal::ZERO
        } else {
            totals
                .total_revenue
                .checked_div(Decimal::from(totals.total_sales))
                .unwrap_or(Decimal::ZERO)
        };

        Self {
            total_units: totals.total_units,
            total_revenue: totals.total_revenue,
            total_sales: totals.total_sales,
            avg_order_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_math() {
        let meta = PaginationMeta::new(3, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);

        let meta = PaginationMeta::new(1, 10, 30);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_pagination_empty_result() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);

        let meta = PaginationMeta::new(4, 10, 0);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_pagination_serialization() {
        let json = serde_json::to_value(PaginationMeta::new(2, 5, 11)).unwrap();
        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["totalCount"], 11);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["hasPrevPage"], true);
    }

    #[test]
    fn test_summary_average() {
        let summary = SalesSummary::from(SummaryTotals {
            total_units: 7,
            total_revenue: Decimal::new(30000, 2),
            total_sales: 4,
        });
        assert_eq!(summary.avg_order_value, Decimal::new(7500, 2));

        let empty = SalesSummary::from(SummaryTotals::default());
        assert_eq!(empty.avg_order_value, Decimal::ZERO);
        assert_eq!(empty.total_sales, 0);
    }

    #[test]
    fn test_summary_serializes_numbers() {
        let summary = SalesSummary::from(SummaryTotals {
            total_units: 3,
            total_revenue: Decimal::new(150, 0),
            total_sales: 2,
        });
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["totalRevenue"], 150.0);
        assert_eq!(json["avgOrderValue"], 75.0);
        assert_eq!(json["totalUnits"], 3);
    }
}
