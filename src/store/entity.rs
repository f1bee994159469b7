//! Entity registry
//!
//! Binds every id-keyed model to its id type, its collection inside the
//! `Snapshot`, and its validation rules. `EntityKind` is the runtime tag for
//! callers that address collections by name (CLI, CSV import).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};
use crate::models::line_item::{validate_document, validate_line_items};
use crate::models::*;

use super::snapshot::Snapshot;
use crate::services::AccountService;

/// A stored entity: a typed id plus the entity's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Record<T: Entity> {
    pub id: T::Id,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Entity> Record<T> {
    pub fn new(id: T::Id, data: T) -> Self {
        Self { id, data }
    }
}

/// A model that lives in its own keyed collection of the snapshot
pub trait Entity: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    type Id: RecordId;

    const KIND: EntityKind;

    /// Whether callers may create this entity through the generic operations
    const DIRECT_CREATE: bool = true;

    fn records(snapshot: &Snapshot) -> &Vec<Record<Self>>;

    fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Record<Self>>;

    /// Check invariants against the rest of the snapshot before a write
    fn validate(&self, _snapshot: &Snapshot) -> LedgerResult<()> {
        Ok(())
    }

    /// Remove records that depend on one that was just deleted
    fn after_delete(_snapshot: &mut Snapshot, _id: &Self::Id) {}
}

/// Runtime tag for every id-keyed collection
///
/// Budgets are keyed by category name and are managed through the budget
/// operations instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Accounts,
    Transactions,
    Customers,
    Vendors,
    Achievements,
    Invoices,
    SalesOrders,
    PurchaseOrders,
    Bills,
    RecurringInvoices,
    RecurringBills,
    RecurringExpenses,
    PaymentsReceived,
    PaymentsMade,
}

impl EntityKind {
    pub const ALL: [EntityKind; 14] = [
        Self::Accounts,
        Self::Transactions,
        Self::Customers,
        Self::Vendors,
        Self::Achievements,
        Self::Invoices,
        Self::SalesOrders,
        Self::PurchaseOrders,
        Self::Bills,
        Self::RecurringInvoices,
        Self::RecurringBills,
        Self::RecurringExpenses,
        Self::PaymentsReceived,
        Self::PaymentsMade,
    ];

    /// Key of the collection in the persisted snapshot
    pub fn key(&self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Transactions => "transactions",
            Self::Customers => "customers",
            Self::Vendors => "vendors",
            Self::Achievements => "achievements",
            Self::Invoices => "invoices",
            Self::SalesOrders => "salesOrders",
            Self::PurchaseOrders => "purchaseOrders",
            Self::Bills => "bills",
            Self::RecurringInvoices => "recurringInvoices",
            Self::RecurringBills => "recurringBills",
            Self::RecurringExpenses => "recurringExpenses",
            Self::PaymentsReceived => "paymentsReceived",
            Self::PaymentsMade => "paymentsMade",
        }
    }

    /// Singular, human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accounts => "Account",
            Self::Transactions => "Transaction",
            Self::Customers => "Customer",
            Self::Vendors => "Vendor",
            Self::Achievements => "Achievement",
            Self::Invoices => "Invoice",
            Self::SalesOrders => "Sales order",
            Self::PurchaseOrders => "Purchase order",
            Self::Bills => "Bill",
            Self::RecurringInvoices => "Recurring invoice",
            Self::RecurringBills => "Recurring bill",
            Self::RecurringExpenses => "Recurring expense",
            Self::PaymentsReceived => "Payment received",
            Self::PaymentsMade => "Payment made",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EntityKind {
    type Err = LedgerError;

    /// Accepts the snapshot key in any case, with or without separators
    /// ("salesOrders", "sales-orders", "sales_orders")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.key().to_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.key()).collect();
                LedgerError::Validation(format!(
                    "Unknown collection '{}'. Known collections: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Run `$body` with `$t` bound to the model type behind an `EntityKind`
macro_rules! with_entity_type {
    ($kind:expr, $t:ident => $body:expr) => {
        match $kind {
            $crate::store::EntityKind::Accounts => {
                type $t = $crate::models::Account;
                $body
            }
            $crate::store::EntityKind::Transactions => {
                type $t = $crate::models::Transaction;
                $body
            }
            $crate::store::EntityKind::Customers => {
                type $t = $crate::models::Customer;
                $body
            }
            $crate::store::EntityKind::Vendors => {
                type $t = $crate::models::Vendor;
                $body
            }
            $crate::store::EntityKind::Achievements => {
                type $t = $crate::models::Achievement;
                $body
            }
            $crate::store::EntityKind::Invoices => {
                type $t = $crate::models::Invoice;
                $body
            }
            $crate::store::EntityKind::SalesOrders => {
                type $t = $crate::models::SalesOrder;
                $body
            }
            $crate::store::EntityKind::PurchaseOrders => {
                type $t = $crate::models::PurchaseOrder;
                $body
            }
            $crate::store::EntityKind::Bills => {
                type $t = $crate::models::Bill;
                $body
            }
            $crate::store::EntityKind::RecurringInvoices => {
                type $t = $crate::models::RecurringInvoice;
                $body
            }
            $crate::store::EntityKind::RecurringBills => {
                type $t = $crate::models::RecurringBill;
                $body
            }
            $crate::store::EntityKind::RecurringExpenses => {
                type $t = $crate::models::RecurringExpense;
                $body
            }
            $crate::store::EntityKind::PaymentsReceived => {
                type $t = $crate::models::PaymentReceived;
                $body
            }
            $crate::store::EntityKind::PaymentsMade => {
                type $t = $crate::models::PaymentMade;
                $body
            }
        }
    };
}

pub(crate) use with_entity_type;

macro_rules! impl_entity {
    ($ty:ty, $id:ty, $kind:ident, $field:ident { $($extra:tt)* }) => {
        impl Entity for $ty {
            type Id = $id;

            const KIND: EntityKind = EntityKind::$kind;

            fn records(snapshot: &Snapshot) -> &Vec<Record<Self>> {
                &snapshot.$field
            }

            fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Record<Self>> {
                &mut snapshot.$field
            }

            $($extra)*
        }
    };
}

fn require_name(kind: EntityKind, name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(format!(
            "{} name cannot be empty",
            kind.label()
        )));
    }
    Ok(())
}

fn require_category(snapshot: &Snapshot, category: &str) -> LedgerResult<()> {
    if category != UNCATEGORIZED && snapshot.budget(category).is_none() {
        return Err(LedgerError::Validation(format!(
            "Unknown category '{}'",
            category
        )));
    }
    Ok(())
}

impl_entity!(Account, AccountId, Accounts, accounts {
    fn validate(&self, _snapshot: &Snapshot) -> LedgerResult<()> {
        Account::validate(self).map_err(|e| LedgerError::Validation(e.to_string()))
    }

    fn after_delete(snapshot: &mut Snapshot, id: &AccountId) {
        AccountService::new(snapshot).remove_dependents(id);
    }
});

impl_entity!(Transaction, TransactionId, Transactions, transactions {
    fn validate(&self, snapshot: &Snapshot) -> LedgerResult<()> {
        if !self.amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Transaction amount must be positive, got {}",
                self.amount
            )));
        }
        require_category(snapshot, &self.category)
    }
});

impl_entity!(Customer, CustomerId, Customers, customers {
    fn validate(&self, _snapshot: &Snapshot) -> LedgerResult<()> {
        require_name(Self::KIND, &self.name)
    }
});

impl_entity!(Vendor, VendorId, Vendors, vendors {
    fn validate(&self, _snapshot: &Snapshot) -> LedgerResult<()> {
        require_name(Self::KIND, &self.name)
    }
});

impl_entity!(Achievement, AchievementId, Achievements, achievements {});

macro_rules! document_validation {
    () => {
        fn validate(&self, _snapshot: &Snapshot) -> LedgerResult<()> {
            validate_document(&self.line_items, self.sub_total, self.tax, self.total)
        }
    };
}

macro_rules! profile_validation {
    () => {
        fn validate(&self, _snapshot: &Snapshot) -> LedgerResult<()> {
            validate_line_items(&self.line_items)?;
            if self.total.is_negative() {
                return Err(LedgerError::Validation(format!(
                    "{} total cannot be negative",
                    Self::KIND.label()
                )));
            }
            Ok(())
        }
    };
}

impl_entity!(Invoice, InvoiceId, Invoices, invoices { document_validation!(); });
impl_entity!(SalesOrder, SalesOrderId, SalesOrders, sales_orders { document_validation!(); });
impl_entity!(PurchaseOrder, PurchaseOrderId, PurchaseOrders, purchase_orders { document_validation!(); });
impl_entity!(Bill, BillId, Bills, bills { document_validation!(); });
impl_entity!(RecurringInvoice, RecurringInvoiceId, RecurringInvoices, recurring_invoices { profile_validation!(); });
impl_entity!(RecurringBill, RecurringBillId, RecurringBills, recurring_bills { profile_validation!(); });

impl_entity!(RecurringExpense, RecurringExpenseId, RecurringExpenses, recurring_expenses {
    fn validate(&self, snapshot: &Snapshot) -> LedgerResult<()> {
        if !self.amount.is_positive() {
            return Err(LedgerError::Validation(
                "Recurring expense amount must be positive".into(),
            ));
        }
        require_category(snapshot, &self.category)
    }
});

impl_entity!(PaymentReceived, PaymentReceivedId, PaymentsReceived, payments_received {
    const DIRECT_CREATE: bool = false;
});

impl_entity!(PaymentMade, PaymentMadeId, PaymentsMade, payments_made {
    const DIRECT_CREATE: bool = false;
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_accepts_key_variants() {
        assert_eq!("salesOrders".parse::<EntityKind>().unwrap(), EntityKind::SalesOrders);
        assert_eq!("sales-orders".parse::<EntityKind>().unwrap(), EntityKind::SalesOrders);
        assert_eq!("RECURRING_BILLS".parse::<EntityKind>().unwrap(), EntityKind::RecurringBills);
        assert!("budgets".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_every_kind_has_distinct_key() {
        let keys: std::collections::HashSet<_> = EntityKind::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_record_flattens_fields() {
        let record = Record::<Customer>::new(CustomerId::from_raw("cus-1"), Customer::new("Acme"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "cus-1");
        assert_eq!(json["name"], "Acme");

        let back: Record<Customer> = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
