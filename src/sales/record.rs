//! Sales record model
//!
//! Records are created by an external ingestion process and never mutated
//! here. JSON uses camelCase keys to match the dashboard contract.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single sales transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Unique transaction identifier
    pub transaction_id: String,

    /// Transaction timestamp (UTC)
    pub date: DateTime<Utc>,

    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: String,
    pub age: u32,
    pub customer_region: String,
    pub product_category: String,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    pub quantity: u32,
    pub price_per_unit: Decimal,

    /// Discount percentage, 0-100
    pub discount_percentage: Decimal,

    /// quantity × price per unit, before discount
    pub total_amount: Decimal,

    /// Total amount after discount
    pub final_amount: Decimal,

    pub payment_method: String,
}

/// String-valued record dimensions that predicates and distinct-value
/// lookups can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CustomerName,
    PhoneNumber,
    Gender,
    CustomerRegion,
    ProductCategory,
    PaymentMethod,
}

impl Field {
    /// Get the wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CustomerName => "customerName",
            Field::PhoneNumber => "phoneNumber",
            Field::Gender => "gender",
            Field::CustomerRegion => "customerRegion",
            Field::ProductCategory => "productCategory",
            Field::PaymentMethod => "paymentMethod",
        }
    }

    /// Read this field from a record
    pub fn value<'a>(&self, record: &'a SalesRecord) -> &'a str {
        match self {
            Field::CustomerName => &record.customer_name,
            Field::PhoneNumber => &record.phone_number,
            Field::Gender => &record.gender,
            Field::CustomerRegion => &record.customer_region,
            Field::ProductCategory => &record.product_category,
            Field::PaymentMethod => &record.payment_method,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
