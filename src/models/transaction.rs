//! Transaction model
//!
//! Represents a single money movement, optionally tied to an account and
//! always filed under a budget category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::budget::UNCATEGORIZED;
use super::ids::AccountId;
use super::money::Money;

/// Direction of a transaction relative to the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money coming in
    Inflow,
    /// Money going out
    Outflow,
}

impl Direction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inflow" | "in" | "income" => Some(Self::Inflow),
            "outflow" | "out" | "expense" => Some(Self::Outflow),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflow => write!(f, "inflow"),
            Self::Outflow => write!(f, "outflow"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The account this transaction belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Amount (always positive; `direction` carries the sign)
    pub amount: Money,

    /// Inflow or outflow
    #[serde(rename = "type")]
    pub direction: Direction,

    /// Budget category name
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

impl Transaction {
    /// Create an uncategorized transaction
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Money, direction: Direction) -> Self {
        Self {
            account_id: None,
            date,
            description: description.into(),
            amount,
            direction,
            category: default_category(),
        }
    }

    /// Create an outflow
    pub fn outflow(date: NaiveDate, description: impl Into<String>, amount: Money) -> Self {
        Self::new(date, description, amount, Direction::Outflow)
    }

    /// Create an inflow
    pub fn inflow(date: NaiveDate, description: impl Into<String>, amount: Money) -> Self {
        Self::new(date, description, amount, Direction::Inflow)
    }

    /// Attach to an account
    pub fn in_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// File under a category
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Amount with sign applied: inflows positive, outflows negative
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Inflow => self.amount,
            Direction::Outflow => -self.amount,
        }
    }

    pub fn is_inflow(&self) -> bool {
        self.direction == Direction::Inflow
    }

    pub fn is_outflow(&self) -> bool {
        self.direction == Direction::Outflow
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount(),
            self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_signed_amount() {
        let out = Transaction::outflow(test_date(), "Figma", Money::from_cents(1500));
        let inn = Transaction::inflow(test_date(), "Client payment", Money::from_cents(90000));
        assert_eq!(out.signed_amount().cents(), -1500);
        assert_eq!(inn.signed_amount().cents(), 90000);
        assert!(out.is_outflow());
        assert!(inn.is_inflow());
    }

    #[test]
    fn test_default_category_is_uncategorized() {
        let txn = Transaction::outflow(test_date(), "Coffee", Money::from_cents(450));
        assert_eq!(txn.category, UNCATEGORIZED);

        let json = r#"{"date":"2024-03-15","amount":450,"type":"outflow"}"#;
        let parsed: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.category, UNCATEGORIZED);
        assert!(parsed.account_id.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let txn = Transaction::inflow(test_date(), "Retainer", Money::from_cents(100))
            .in_account(AccountId::from("acc-1"))
            .in_category("Software");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["accountId"], "acc-1");
        assert_eq!(json["type"], "inflow");
        assert_eq!(json["date"], "2024-03-15");
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("Inflow"), Some(Direction::Inflow));
        assert_eq!(Direction::parse("expense"), Some(Direction::Outflow));
        assert_eq!(Direction::parse("sideways"), None);
    }
}
