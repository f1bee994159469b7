//! The snapshot: every collection of the ledger at a point in time
//!
//! Typed generic operations live here. They mutate the snapshot in place;
//! `Ledger` runs them on a copy and swaps it in only when they succeed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::*;

use super::entity::{Entity, Record};

/// Complete in-memory state of all collections
///
/// Keys missing from a stored snapshot take their default values, so newer
/// collections appear empty and budgets fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub transactions: Vec<Record<Transaction>>,
    pub customers: Vec<Record<Customer>>,
    pub vendors: Vec<Record<Vendor>>,
    pub budgets: Vec<Budget>,
    pub achievements: Vec<Record<Achievement>>,
    pub accounts: Vec<Record<Account>>,
    pub invoices: Vec<Record<Invoice>>,
    pub sales_orders: Vec<Record<SalesOrder>>,
    pub purchase_orders: Vec<Record<PurchaseOrder>>,
    pub bills: Vec<Record<Bill>>,
    pub recurring_invoices: Vec<Record<RecurringInvoice>>,
    pub recurring_expenses: Vec<Record<RecurringExpense>>,
    pub recurring_bills: Vec<Record<RecurringBill>>,
    pub payments_made: Vec<Record<PaymentMade>>,
    pub payments_received: Vec<Record<PaymentReceived>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            customers: Vec::new(),
            vendors: Vec::new(),
            budgets: Budget::defaults(),
            achievements: Achievement::defaults()
                .into_iter()
                .map(|(id, achievement)| Record::new(id, achievement))
                .collect(),
            accounts: Vec::new(),
            invoices: Vec::new(),
            sales_orders: Vec::new(),
            purchase_orders: Vec::new(),
            bills: Vec::new(),
            recurring_invoices: Vec::new(),
            recurring_expenses: Vec::new(),
            recurring_bills: Vec::new(),
            payments_made: Vec::new(),
            payments_received: Vec::new(),
        }
    }
}

impl Snapshot {
    /// All records of one kind, in insertion order
    pub fn records<T: Entity>(&self) -> &[Record<T>] {
        T::records(self)
    }

    /// Find a record by id
    pub fn get<T: Entity>(&self, id: &T::Id) -> Option<&Record<T>> {
        T::records(self).iter().find(|record| &record.id == id)
    }

    /// Find a budget by category name (case-insensitive)
    pub fn budget(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.matches(category))
    }

    fn position<T: Entity>(&self, id: &T::Id) -> Option<usize> {
        T::records(self).iter().position(|record| &record.id == id)
    }

    /// Append with a freshly minted id, skipping validation. Used by the
    /// workflow operations that build entities themselves.
    pub(crate) fn insert<T: Entity>(&mut self, data: T) -> Record<T> {
        let record = Record::new(T::Id::generate(), data);
        T::records_mut(self).push(record.clone());
        record
    }

    fn ensure_creatable<T: Entity>() -> LedgerResult<()> {
        if T::DIRECT_CREATE {
            Ok(())
        } else {
            Err(LedgerError::Validation(format!(
                "{} records are created by recording a payment, not directly",
                T::KIND.label()
            )))
        }
    }

    /// Validate and append a new entity
    pub fn create<T: Entity>(&mut self, data: T) -> LedgerResult<Record<T>> {
        Self::ensure_creatable::<T>()?;
        data.validate(self)?;
        Ok(self.insert(data))
    }

    /// Apply `f` to the entity with the given id
    ///
    /// Returns the updated record, or None when the id is unknown.
    pub fn update<T, F>(&mut self, id: &T::Id, f: F) -> Option<Record<T>>
    where
        T: Entity,
        F: FnOnce(&mut T),
    {
        let Some(index) = self.position::<T>(id) else {
            debug!(kind = %T::KIND, %id, "update of unknown record ignored");
            return None;
        };
        let record = &mut T::records_mut(self)[index];
        f(&mut record.data);
        Some(record.clone())
    }

    /// Merge the keys of a JSON object onto an entity
    ///
    /// The `id` key is never merged. The merged record must still decode and
    /// validate, otherwise nothing changes.
    pub fn patch<T: Entity>(&mut self, id: &T::Id, patch: &Value) -> LedgerResult<Option<Record<T>>> {
        let fields = patch.as_object().ok_or_else(|| {
            LedgerError::Validation(format!("{} update must be a JSON object", T::KIND.label()))
        })?;

        let Some(index) = self.position::<T>(id) else {
            debug!(kind = %T::KIND, %id, "patch of unknown record ignored");
            return Ok(None);
        };

        let mut merged = serde_json::to_value(&T::records(self)[index])?;
        if let Value::Object(map) = &mut merged {
            for (key, value) in fields.iter().filter(|(key, _)| key.as_str() != "id") {
                map.insert(key.clone(), value.clone());
            }
        }

        let updated: Record<T> = serde_json::from_value(merged).map_err(|e| {
            LedgerError::Validation(format!("Invalid {} update: {}", T::KIND.label(), e))
        })?;
        updated.data.validate(self)?;

        T::records_mut(self)[index] = updated.clone();
        Ok(Some(updated))
    }

    /// Remove the entity with the given id; false when it was absent
    ///
    /// Deleting an account also removes its transactions and recurring
    /// expenses.
    pub fn delete<T: Entity>(&mut self, id: &T::Id) -> bool {
        let records = T::records_mut(self);
        let before = records.len();
        records.retain(|record| &record.id != id);
        let removed = before != records.len();
        if removed {
            T::after_delete(self, id);
        }
        removed
    }

    /// Append many entities at once, preserving input order
    ///
    /// Every entity is validated before any is appended.
    pub fn import_batch<T: Entity>(&mut self, items: Vec<T>) -> LedgerResult<Vec<Record<T>>> {
        Self::ensure_creatable::<T>()?;
        if items.is_empty() {
            return Err(LedgerError::Validation(format!(
                "No {} records to import",
                T::KIND.label().to_lowercase()
            )));
        }

        for (index, item) in items.iter().enumerate() {
            item.validate(self).map_err(|e| {
                LedgerError::Validation(format!("Record {}: {}", index + 1, e))
            })?;
        }

        Ok(items.into_iter().map(|item| self.insert(item)).collect())
    }
}

/// Human-facing sequential number such as `#INV-1001`
pub fn display_number(prefix: &str, existing: usize, base: usize) -> String {
    format!("#{}-{}", prefix, existing + base)
}
