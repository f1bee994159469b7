//! Account service
//!
//! Account lookup by name or id, and the deletion cascade that removes an
//! account together with everything booked against it.

use crate::models::{Account, AccountId, RecordId};
use crate::store::{Record, Snapshot};

/// What an account deletion removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub account_removed: bool,
    pub transactions_removed: usize,
    pub recurring_expenses_removed: usize,
}

impl CascadeReport {
    pub fn is_empty(&self) -> bool {
        !self.account_removed && self.transactions_removed == 0 && self.recurring_expenses_removed == 0
    }
}

/// Service for account management
pub struct AccountService<'a> {
    snapshot: &'a mut Snapshot,
}

impl<'a> AccountService<'a> {
    pub fn new(snapshot: &'a mut Snapshot) -> Self {
        Self { snapshot }
    }

    /// Delete an account, its transactions and its recurring expenses
    ///
    /// The sweep of transactions and recurring expenses runs even when the
    /// account itself is already gone.
    pub fn delete_with_transactions(&mut self, account_id: &AccountId) -> CascadeReport {
        let (transactions_removed, recurring_expenses_removed) = self.remove_dependents(account_id);
        let account_removed = self.snapshot.delete::<Account>(account_id);

        CascadeReport {
            account_removed,
            transactions_removed,
            recurring_expenses_removed,
        }
    }

    /// Remove the transactions and recurring expenses booked against an
    /// account, returning how many of each went
    pub fn remove_dependents(&mut self, account_id: &AccountId) -> (usize, usize) {
        let transactions = &mut self.snapshot.transactions;
        let before = transactions.len();
        transactions.retain(|txn| txn.data.account_id.as_ref() != Some(account_id));
        let transactions_removed = before - transactions.len();

        let expenses = &mut self.snapshot.recurring_expenses;
        let before = expenses.len();
        expenses.retain(|profile| &profile.data.account_id != account_id);

        (transactions_removed, before - expenses.len())
    }
}

/// Find an account by name (case-insensitive) or id
pub fn find_account<'s>(snapshot: &'s Snapshot, identifier: &str) -> Option<&'s Record<Account>> {
    let identifier = identifier.trim();
    snapshot
        .accounts
        .iter()
        .find(|account| account.data.name.eq_ignore_ascii_case(identifier))
        .or_else(|| snapshot.get::<Account>(&AccountId::from_raw(identifier)))
}
