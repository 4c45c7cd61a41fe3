//! # Predicates
//!
//! Store-neutral predicate tree over sales records. A `PredicateSet` is a
//! conjunction; disjunction appears only through `Predicate::AnyOf`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sales::{Field, SalesRecord};

/// A single condition on a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Predicate {
    /// Field value is one of `values`
    In {
        field: Field,
        values: BTreeSet<String>,
    },

    /// Case-insensitive substring match; `needle` is stored lowercased
    ContainsIgnoreCase { field: Field, needle: String },

    /// Age within `[min, max]`, unbounded above when `max` is `None`
    AgeBetween { min: u32, max: Option<u32> },

    /// Record tags share at least one value with `tags`
    TagsIntersect { tags: BTreeSet<String> },

    /// Record date within `[start, end]`
    DateBetween {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// At least one nested predicate holds
    AnyOf { predicates: Vec<Predicate> },
}

impl Predicate {
    /// Create an "in set" predicate
    pub fn in_set(field: Field, values: BTreeSet<String>) -> Self {
        Predicate::In { field, values }
    }

    /// Create a case-insensitive substring predicate
    pub fn contains_ignore_case(field: Field, needle: &str) -> Self {
        Predicate::ContainsIgnoreCase {
            field,
            needle: needle.to_lowercase(),
        }
    }

    /// Check if a record satisfies this predicate
    pub fn matches(&self, record: &SalesRecord) -> bool {
        match self {
            Predicate::In { field, values } => values.contains(field.value(record)),
            Predicate::ContainsIgnoreCase { field, needle } => {
                field.value(record).to_lowercase().contains(needle.as_str())
            }
            Predicate::AgeBetween { min, max } => {
                record.age >= *min && max.map_or(true, |max| record.age <= max)
            }
            Predicate::TagsIntersect { tags } => !record.tags.is_disjoint(tags),
            Predicate::DateBetween { start, end } => record.date >= *start && record.date <= *end,
            Predicate::AnyOf { predicates } => predicates.iter().any(|p| p.matches(record)),
        }
    }
}

/// A set of predicates combined with AND logic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    /// Check if a record matches all predicates; the empty set matches everything
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn record(name: &str, phone: &str, age: u32, tags: &[&str]) -> SalesRecord {
        SalesRecord {
            transaction_id: format!("T-{}", name),
            date: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
            customer_id: "C-1".to_string(),
            customer_name: name.to_string(),
            phone_number: phone.to_string(),
            gender: "Female".to_string(),
            age,
            customer_region: "North".to_string(),
            product_category: "Clothing".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            quantity: 1,
            price_per_unit: Decimal::new(100, 0),
            discount_percentage: Decimal::ZERO,
            total_amount: Decimal::new(100, 0),
            final_amount: Decimal::new(100, 0),
            payment_method: "Cash".to_string(),
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_in_set() {
        let p = Predicate::in_set(Field::CustomerRegion, set(&["North", "East"]));
        assert!(p.matches(&record("Anita", "1", 30, &[])));

        let p = Predicate::in_set(Field::CustomerRegion, set(&["South"]));
        assert!(!p.matches(&record("Anita", "1", 30, &[])));
    }

    #[test]
    fn test_contains_ignore_case() {
        let p = Predicate::contains_ignore_case(Field::CustomerName, "NIT");
        assert!(p.matches(&record("Anita", "1", 30, &[])));
        assert!(!p.matches(&record("Bharat", "1", 30, &[])));

        let p = Predicate::contains_ignore_case(Field::PhoneNumber, "999");
        assert!(p.matches(&record("Anita", "+91 99999", 30, &[])));
    }

    #[test]
    fn test_age_between() {
        let bounded = Predicate::AgeBetween { min: 18, max: Some(25) };
        assert!(bounded.matches(&record("a", "1", 18, &[])));
        assert!(bounded.matches(&record("a", "1", 25, &[])));
        assert!(!bounded.matches(&record("a", "1", 26, &[])));

        let open = Predicate::AgeBetween { min: 56, max: None };
        assert!(!open.matches(&record("a", "1", 55, &[])));
        assert!(open.matches(&record("a", "1", 99, &[])));
    }

    #[test]
    fn test_tags_intersect() {
        let p = Predicate::TagsIntersect {
            tags: set(&["Premium", "Discounted"]),
        };
        assert!(p.matches(&record("a", "1", 30, &["Discounted", "New Arrival"])));
        assert!(!p.matches(&record("a", "1", 30, &["New Arrival"])));
        assert!(!p.matches(&record("a", "1", 30, &[])));
    }

    #[test]
    fn test_any_of() {
        let p = Predicate::AnyOf {
            predicates: vec![
                Predicate::contains_ignore_case(Field::CustomerName, "zed"),
                Predicate::AgeBetween { min: 56, max: None },
            ],
        };
        assert!(p.matches(&record("Zedd", "1", 20, &[])));
        assert!(p.matches(&record("Anita", "1", 60, &[])));
        assert!(!p.matches(&record("Anita", "1", 20, &[])));
    }

    #[test]
    fn test_predicate_set() {
        let empty = PredicateSet::new();
        assert!(empty.matches(&record("a", "1", 30, &[])));

        let filters = PredicateSet::new()
            .and(Predicate::in_set(Field::Gender, set(&["Female"])))
            .and(Predicate::AgeBetween { min: 36, max: Some(45) });

        assert!(filters.matches(&record("a", "1", 40, &[])));
        assert!(!filters.matches(&record("a", "1", 30, &[])));
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_serializes_with_op_tag() {
        let p = Predicate::AgeBetween { min: 56, max: None };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["op"], "ageBetween");
        assert_eq!(json["min"], 56);
    }
}
