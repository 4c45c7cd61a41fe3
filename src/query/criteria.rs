//! # Filter Criteria
//!
//! Per-dimension sets of acceptable values. An empty set means
//! "no restriction on this dimension", never "exclude all".

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Age bucket offered by the dashboard filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBucket {
    From18To25,
    From26To35,
    From36To45,
    From46To55,
    Over55,
}

impl AgeBucket {
    /// All buckets, in display order
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::From18To25,
        AgeBucket::From26To35,
        AgeBucket::From36To45,
        AgeBucket::From46To55,
        AgeBucket::Over55,
    ];

    /// Parse a bucket token; unrecognized tokens yield `None`
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "18-25" => Some(AgeBucket::From18To25),
            "26-35" => Some(AgeBucket::From26To35),
            "36-45" => Some(AgeBucket::From36To45),
            "46-55" => Some(AgeBucket::From46To55),
            "55+" => Some(AgeBucket::Over55),
            _ => None,
        }
    }

    /// The token used on the wire
    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::From18To25 => "18-25",
            AgeBucket::From26To35 => "26-35",
            AgeBucket::From36To45 => "36-45",
            AgeBucket::From46To55 => "46-55",
            AgeBucket::Over55 => "55+",
        }
    }

    /// Inclusive age interval; `None` upper bound means unbounded.
    ///
    /// "55+" starts at 56: the bucket means strictly older than 55.
    pub fn bounds(&self) -> (u32, Option<u32>) {
        match self {
            AgeBucket::From18To25 => (18, Some(25)),
            AgeBucket::From26To35 => (26, Some(35)),
            AgeBucket::From36To45 => (36, Some(45)),
            AgeBucket::From46To55 => (46, Some(55)),
            AgeBucket::Over55 => (56, None),
        }
    }

    /// Labels of every bucket, for the filter-options endpoint
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|b| b.label().to_string()).collect()
    }
}

/// Inclusive calendar date interval, interpreted in UTC
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Timestamp bounds `[start 00:00:00, end 23:59:59]`.
    ///
    /// Returns `None` unless both dates are present.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.start?.and_time(NaiveTime::MIN).and_utc();
        let end = self.end?.and_hms_opt(23, 59, 59)?.and_utc();
        Some((start, end))
    }
}

/// Filter selections for the records endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub customer_region: BTreeSet<String>,
    pub gender: BTreeSet<String>,
    /// Raw bucket tokens; unrecognized ones are ignored by the builder
    pub age_range: BTreeSet<String>,
    pub product_category: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub payment_method: BTreeSet<String>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    /// Recognized age buckets, in ascending order
    pub fn age_buckets(&self) -> Vec<AgeBucket> {
        let buckets: BTreeSet<AgeBucket> = self
            .age_range
            .iter()
            .filter_map(|token| AgeBucket::parse(token))
            .collect();
        buckets.into_iter().collect()
    }
}

/// The narrower filter accepted by the summary endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryCriteria {
    pub customer_region: BTreeSet<String>,
    pub product_category: BTreeSet<String>,
}
