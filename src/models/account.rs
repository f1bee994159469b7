//! Account model
//!
//! Represents money-holding accounts (bank accounts, credit cards, cash).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountType {
    /// Bank (checking/savings) account
    #[default]
    Bank,
    /// Credit card; opening balances are usually negative
    #[serde(rename = "Credit Card")]
    CreditCard,
    /// Cash/petty cash
    Cash,
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "bank" | "checking" | "savings" => Some(Self::Bank),
            "creditcard" | "credit" => Some(Self::CreditCard),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bank => write!(f, "Bank"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Cash => write!(f, "Cash"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account name (e.g., "Operating Account")
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Last four digits of the account/card number
    #[serde(default)]
    pub last4: String,

    /// Opening balance; the current balance adds all linked transactions
    #[serde(rename = "balance")]
    pub opening_balance: Money,
}

impl Account {
    /// Create a new account with a zero opening balance
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            name: name.into(),
            account_type,
            last4: String::new(),
            opening_balance: Money::zero(),
        }
    }

    /// Set the opening balance
    pub fn with_opening_balance(mut self, opening_balance: Money) -> Self {
        self.opening_balance = opening_balance;
        self
    }

    /// Set the last four digits
    pub fn with_last4(mut self, last4: impl Into<String>) -> Self {
        self.last4 = last4.into();
        self
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        if self.last4.len() > 4 || !self.last4.chars().all(|c| c.is_ascii_digit()) {
            return Err(AccountValidationError::InvalidLast4(self.last4.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.last4.is_empty() {
            write!(f, "{} ({})", self.name, self.account_type)
        } else {
            write!(f, "{} ({} ••{})", self.name, self.account_type, self.last4)
        }
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidLast4(String),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::InvalidLast4(s) => write!(f, "Last 4 digits must be up to 4 digits, got '{}'", s),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Operating", AccountType::Bank);
        assert_eq!(account.name, "Operating");
        assert_eq!(account.account_type, AccountType::Bank);
        assert_eq!(account.opening_balance, Money::zero());
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Valid Name", AccountType::Bank).with_last4("4242");
        assert!(account.validate().is_ok());

        account.last4 = "42a".into();
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::InvalidLast4(_))
        ));

        account.last4.clear();
        account.name = String::new();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        account.name = "a".repeat(101);
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::NameTooLong(_))
        ));
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("bank"), Some(AccountType::Bank));
        assert_eq!(AccountType::parse("Credit Card"), Some(AccountType::CreditCard));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::CreditCard));
        assert_eq!(AccountType::parse("CASH"), Some(AccountType::Cash));
        assert_eq!(AccountType::parse("brokerage"), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let account = Account::new("Card", AccountType::CreditCard)
            .with_opening_balance(Money::from_cents(-2500));
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "Credit Card");
        assert_eq!(json["balance"], -2500);
        assert_eq!(json["last4"], "");
    }
}
