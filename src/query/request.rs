//! # Request Parser
//!
//! Parses dashboard query-string pairs into typed requests, and back.
//! Multi-valued dimensions use repeated keys (`tags=A&tags=B`).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::{DashboardError, DashboardResult};

use super::criteria::{DateRange, FilterCriteria, SummaryCriteria};

/// Date format accepted for `dateRangeStart` / `dateRangeEnd`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A records request as received from the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesQuery {
    pub search: String,
    pub criteria: FilterCriteria,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl SalesQuery {
    /// Parse query-string pairs. Unknown keys are ignored and empty
    /// values count as absent.
    pub fn from_pairs(pairs: &[(String, String)]) -> DashboardResult<Self> {
        let mut query = SalesQuery::default();

        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }

            let criteria = &mut query.criteria;
            match key.as_str() {
                "search" => query.search = value.clone(),
                "customerRegion" => insert(&mut criteria.customer_region, value),
                "gender" => insert(&mut criteria.gender, value),
                "ageRange" => insert(&mut criteria.age_range, value),
                "productCategory" => insert(&mut criteria.product_category, value),
                "tags" => insert(&mut criteria.tags, value),
                "paymentMethod" => insert(&mut criteria.payment_method, value),
                "dateRangeStart" => {
                    criteria.date_range.start = Some(parse_date("dateRangeStart", value)?)
                }
                "dateRangeEnd" => criteria.date_range.end = Some(parse_date("dateRangeEnd", value)?),
                "sortBy" => query.sort_by = Some(value.clone()),
                "sortOrder" => query.sort_order = Some(value.clone()),
                "page" => query.page = Some(parse_positive("page", value)?),
                "pageSize" => query.page_size = Some(parse_positive("pageSize", value)?),
                _ => {}
            }
        }

        Ok(query)
    }

    /// Parse a JSON request object, e.g. `{"tags": ["A", "B"], "page": 2}`.
    ///
    /// The object is flattened into the same pairs a query string yields,
    /// so both surfaces apply identical validation.
    pub fn from_json(request: &Value) -> DashboardResult<Self> {
        Self::from_pairs(&json_pairs(request)?)
    }

    /// Emit query-string pairs in a canonical key order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        criteria_pairs(&self.criteria, &mut pairs);
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy".to_string(), sort_by.clone()));
        }
        if let Some(sort_order) = &self.sort_order {
            pairs.push(("sortOrder".to_string(), sort_order.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }

        pairs
    }
}

impl SummaryCriteria {
    /// Parse query-string pairs; only region and category are read
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut criteria = SummaryCriteria::default();

        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "customerRegion" => insert(&mut criteria.customer_region, value),
                "productCategory" => insert(&mut criteria.product_category, value),
                _ => {}
            }
        }

        criteria
    }

    /// Parse a JSON request object with the same rules as `from_pairs`
    pub fn from_json(request: &Value) -> DashboardResult<Self> {
        Ok(Self::from_pairs(&json_pairs(request)?))
    }
}

/// Flatten a JSON object into query-string pairs.
///
/// Arrays become repeated keys; `null` is skipped; numbers and booleans
/// are rendered as text. Nested objects are rejected.
fn json_pairs(request: &Value) -> DashboardResult<Vec<(String, String)>> {
    let object = request
        .as_object()
        .ok_or_else(|| DashboardError::validation("request must be a JSON object"))?;

    let mut pairs = Vec::new();
    for (key, value) in object {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(key, item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(key, other)? {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }

    Ok(pairs)
}

fn scalar_text(key: &str, value: &Value) -> DashboardResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(DashboardError::validation(format!(
            "Invalid {}: nested arrays and objects are not accepted",
            key
        ))),
    }
}

/// Append filter pairs for every non-empty dimension
fn criteria_pairs(criteria: &FilterCriteria, pairs: &mut Vec<(String, String)>) {
    let dimensions: [(&str, &BTreeSet<String>); 6] = [
        ("customerRegion", &criteria.customer_region),
        ("gender", &criteria.gender),
        ("ageRange", &criteria.age_range),
        ("productCategory", &criteria.product_category),
        ("tags", &criteria.tags),
        ("paymentMethod", &criteria.payment_method),
    ];

    for (key, values) in dimensions {
        pairs.extend(values.iter().map(|v| (key.to_string(), v.clone())));
    }

    let DateRange { start, end } = criteria.date_range;
    if let Some(start) = start {
        pairs.push(("dateRangeStart".to_string(), start.format(DATE_FORMAT).to_string()));
    }
    if let Some(end) = end {
        pairs.push(("dateRangeEnd".to_string(), end.format(DATE_FORMAT).to_string()));
    }
}

fn insert(set: &mut BTreeSet<String>, value: &str) {
    set.insert(value.to_string());
}

/// Parse a strict `YYYY-MM-DD` date
fn parse_date(name: &str, value: &str) -> DashboardResult<NaiveDate> {
    let well_formed = value.len() == 10
        && value
            .chars()
            .enumerate()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });

    if !well_formed {
        return Err(DashboardError::validation(format!(
            "Invalid {}: '{}' (expected YYYY-MM-DD)",
            name, value
        )));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        DashboardError::validation(format!("Invalid {}: '{}' ({})", name, value, e))
    })
}

/// Parse a positive integer parameter
fn parse_positive(name: &str, value: &str) -> DashboardResult<usize> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(DashboardError::validation(format!(
            "Invalid {}: '{}' (expected a positive integer)",
            name, value
        ))),
    }
}
