//! Recurring profiles
//!
//! A profile is a template that periodically materializes a concrete
//! invoice, bill or expense transaction. `next_date` is the date of the next
//! occurrence; only `Active` profiles fire.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::budget::UNCATEGORIZED;
use super::ids::{AccountId, CustomerId, VendorId};
use super::line_item::LineItem;
use super::money::Money;

/// How often a profile repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The occurrence one period after `date`
    ///
    /// Monthly and yearly steps clamp to the last day of the target month,
    /// so Jan 31 is followed by Feb 29 (leap year) or Feb 28.
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => date + Days::new(7),
            Self::Monthly => date + Months::new(1),
            Self::Yearly => date + Months::new(12),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            "yearly" | "year" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// Whether a profile participates in scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProfileStatus {
    #[default]
    Active,
    Paused,
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// Scheduling fields shared by every recurring profile
pub trait Schedule {
    fn frequency(&self) -> Frequency;
    fn status(&self) -> ProfileStatus;
    fn next_date(&self) -> NaiveDate;
    fn set_next_date(&mut self, date: NaiveDate);

    /// Whether the profile should fire on `today`
    fn is_due(&self, today: NaiveDate) -> bool {
        self.status() == ProfileStatus::Active && self.next_date() <= today
    }

    /// Move `next_date` forward by exactly one period and return the date
    /// that was due
    fn advance(&mut self) -> NaiveDate {
        let due = self.next_date();
        let next = self.frequency().advance(due);
        self.set_next_date(next);
        due
    }
}

macro_rules! impl_schedule {
    ($ty:ty) => {
        impl Schedule for $ty {
            fn frequency(&self) -> Frequency {
                self.frequency
            }

            fn status(&self) -> ProfileStatus {
                self.status
            }

            fn next_date(&self) -> NaiveDate {
                self.next_date
            }

            fn set_next_date(&mut self, date: NaiveDate) {
                self.next_date = date;
            }
        }
    };
}

/// Template for invoices sent to a customer on a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringInvoice {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub status: ProfileStatus,
    /// Grand total; any excess over the line item sum is treated as tax
    pub total: Money,
}

impl RecurringInvoice {
    /// Active profile whose first occurrence is `start_date`
    pub fn new(
        customer_id: CustomerId,
        line_items: Vec<LineItem>,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        let total = super::line_item::subtotal(&line_items);
        Self {
            customer_id,
            line_items,
            frequency,
            start_date,
            next_date: start_date,
            status: ProfileStatus::Active,
            total,
        }
    }
}

/// Template for bills from a vendor on a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBill {
    pub vendor_id: VendorId,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub status: ProfileStatus,
    pub total: Money,
}

impl RecurringBill {
    pub fn new(
        vendor_id: VendorId,
        line_items: Vec<LineItem>,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        let total = super::line_item::subtotal(&line_items);
        Self {
            vendor_id,
            line_items,
            frequency,
            start_date,
            next_date: start_date,
            status: ProfileStatus::Active,
            total,
        }
    }
}

/// Template for a flat-amount outflow from an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub account_id: AccountId,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub status: ProfileStatus,
    pub amount: Money,
}

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

impl RecurringExpense {
    pub fn new(
        description: impl Into<String>,
        account_id: AccountId,
        amount: Money,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            category: default_category(),
            account_id,
            frequency,
            start_date,
            next_date: start_date,
            status: ProfileStatus::Active,
            amount,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

impl_schedule!(RecurringInvoice);
impl_schedule!(RecurringBill);
impl_schedule!(RecurringExpense);
