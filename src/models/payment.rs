//! Payment records
//!
//! Payments are never created directly: they are the by-product of recording
//! a payment against an invoice (`PaymentReceived`) or a bill
//! (`PaymentMade`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BillId, CustomerId, InvoiceId, VendorId};
use super::money::Money;

/// How a payment was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[default]
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "PayPal")]
    PayPal,
}

impl PaymentMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "creditcard" | "card" => Some(Self::CreditCard),
            "banktransfer" | "bank" | "transfer" | "ach" => Some(Self::BankTransfer),
            "paypal" => Some(Self::PayPal),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditCard => write!(f, "Credit Card"),
            Self::BankTransfer => write!(f, "Bank Transfer"),
            Self::PayPal => write!(f, "PayPal"),
        }
    }
}

/// Caller-supplied part of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub amount: Money,
    pub date: NaiveDate,
    pub method: PaymentMethod,
}

impl PaymentDetails {
    pub fn new(amount: Money, date: NaiveDate, method: PaymentMethod) -> Self {
        Self {
            amount,
            date,
            method,
        }
    }
}

/// Money received against an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceived {
    /// Display number, e.g. "#PAY-100"
    pub payment_id: String,
    pub customer_id: CustomerId,
    /// Customer name at the time of payment
    pub customer_name: String,
    pub invoice_id: InvoiceId,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub amount: Money,
}

/// Money paid against a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMade {
    /// Display number, e.g. "#PMT-100"
    pub payment_id: String,
    pub vendor_id: VendorId,
    pub bill_id: BillId,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_serialization_matches_labels() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            "\"Bank Transfer\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"PayPal\"").unwrap();
        assert_eq!(parsed, PaymentMethod::PayPal);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(PaymentMethod::parse("credit-card"), Some(PaymentMethod::CreditCard));
        assert_eq!(PaymentMethod::parse("Bank Transfer"), Some(PaymentMethod::BankTransfer));
        assert_eq!(PaymentMethod::parse("cheque"), None);
    }
}
