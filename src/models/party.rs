//! Counterparty models: customers (who we invoice) and vendors (who bill us)
//!
//! Risk and spend metrics are informational; nothing in the engine enforces
//! them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::money::Money;

/// Accept a string or a bare number (CSV imports turn digit-only phone
/// numbers into numbers)
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, got {}",
            other
        ))),
    }
}

/// A customer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "string_or_number")]
    pub phone: String,
    pub billing_address: String,
    pub shipping_address: String,
    /// 0-100, higher is more reliable
    pub reliability_score: u8,
    pub overdue_payments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reliability_score: 100,
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

/// A vendor / supplier
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vendor {
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "string_or_number")]
    pub phone: String,
    pub address: String,
    /// Free text such as "Net 30"
    pub payment_terms: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// 0-100, how dependent the business is on this vendor
    pub dependency_risk: u8,
    pub total_spent: Money,
}

impl Vendor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payment_terms: "Net 30".to_string(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_customer_record_fills_defaults() {
        let customer: Customer = serde_json::from_str(r#"{"name":"Acme"}"#).unwrap();
        assert_eq!(customer.name, "Acme");
        assert_eq!(customer.overdue_payments, 0);
        assert!(customer.avatar_url.is_none());
    }

    #[test]
    fn test_numeric_phone_is_accepted() {
        let customer: Customer =
            serde_json::from_value(serde_json::json!({"name": "Acme", "phone": 5550100})).unwrap();
        assert_eq!(customer.phone, "5550100");
    }

    #[test]
    fn test_vendor_camel_case_fields() {
        let vendor = Vendor::new("Paper Co").with_email("ap@paper.co");
        let json = serde_json::to_value(&vendor).unwrap();
        assert_eq!(json["paymentTerms"], "Net 30");
        assert_eq!(json["totalSpent"], 0);
        assert!(json.get("avatarUrl").is_none());
    }
}
