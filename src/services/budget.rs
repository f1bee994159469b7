//! Budget category service
//!
//! Budgets are keyed by category name. `Uncategorized` always exists and
//! catches transactions whose category was deleted.

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Money, UNCATEGORIZED};
use crate::store::Snapshot;

/// Service for budget categories
pub struct BudgetService<'a> {
    snapshot: &'a mut Snapshot,
}

impl<'a> BudgetService<'a> {
    pub fn new(snapshot: &'a mut Snapshot) -> Self {
        Self { snapshot }
    }

    /// Add a category with a monthly ceiling and nothing spent
    pub fn add_category(&mut self, category: &str, budget: Money) -> LedgerResult<Budget> {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if budget.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Budget for '{}' cannot be negative",
                category
            )));
        }
        if self.snapshot.budget(category).is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Budget category",
                identifier: category.to_string(),
            });
        }

        let entry = Budget::new(category, budget);
        self.snapshot.budgets.push(entry.clone());
        Ok(entry)
    }

    /// Remove a category and move its transactions and recurring expenses
    /// to `Uncategorized`
    ///
    /// Returns the number of reassigned transactions, or None when no such
    /// category exists.
    pub fn delete_category(&mut self, category: &str) -> LedgerResult<Option<usize>> {
        if category.trim().eq_ignore_ascii_case(UNCATEGORIZED) {
            return Err(LedgerError::Validation(format!(
                "'{}' cannot be deleted",
                UNCATEGORIZED
            )));
        }

        let Some(index) = self
            .snapshot
            .budgets
            .iter()
            .position(|budget| budget.matches(category))
        else {
            debug!(category, "delete of unknown budget category ignored");
            return Ok(None);
        };
        let removed = self.snapshot.budgets.remove(index);

        let mut reassigned = 0;
        for txn in &mut self.snapshot.transactions {
            if removed.matches(&txn.data.category) {
                txn.data.category = UNCATEGORIZED.to_string();
                reassigned += 1;
            }
        }
        for profile in &mut self.snapshot.recurring_expenses {
            if removed.matches(&profile.data.category) {
                profile.data.category = UNCATEGORIZED.to_string();
            }
        }
        Ok(Some(reassigned))
    }

    /// Change the monthly ceiling of a category
    pub fn set_ceiling(&mut self, category: &str, budget: Money) -> LedgerResult<Option<Budget>> {
        if budget.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Budget for '{}' cannot be negative",
                category.trim()
            )));
        }

        let Some(entry) = self
            .snapshot
            .budgets
            .iter_mut()
            .find(|entry| entry.matches(category))
        else {
            debug!(category, "ceiling for unknown budget category ignored");
            return Ok(None);
        };
        entry.budget = budget;
        Ok(Some(entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountId, AccountType, Frequency, RecordId, RecurringExpense, Transaction};
    use chrono::NaiveDate;

    fn expense(category: &str) -> Transaction {
        Transaction::outflow(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "Expense",
            Money::from_dollars(10),
        )
        .in_category(category)
    }

    #[test]
    fn test_add_category() {
        let mut snapshot = Snapshot::default();
        let added = BudgetService::new(&mut snapshot)
            .add_category("  Travel ", Money::from_dollars(300))
            .unwrap();

        assert_eq!(added.category, "Travel");
        assert!(added.spent.is_zero());
        assert_eq!(snapshot.budgets.last().unwrap(), &added);
    }

    #[test]
    fn test_add_category_rejects_empty_and_duplicate() {
        let mut snapshot = Snapshot::default();
        let mut service = BudgetService::new(&mut snapshot);

        assert!(matches!(
            service.add_category(" ", Money::zero()),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            service.add_category("software", Money::zero()),
            Err(LedgerError::Duplicate { .. })
        ));
        assert!(service.add_category("Travel", Money::from_cents(-1)).is_err());
        assert_eq!(snapshot.budgets.len(), 4);
    }

    #[test]
    fn test_delete_category_reassigns_transactions() {
        let mut snapshot = Snapshot::default();
        snapshot.create(expense("Marketing")).unwrap();
        snapshot.create(expense("Software")).unwrap();
        snapshot.create(expense("Marketing")).unwrap();

        let reassigned = BudgetService::new(&mut snapshot)
            .delete_category("Marketing")
            .unwrap();

        assert_eq!(reassigned, Some(2));
        assert!(snapshot.budget("Marketing").is_none());
        let categories: Vec<_> = snapshot
            .transactions
            .iter()
            .map(|t| t.data.category.as_str())
            .collect();
        assert_eq!(categories, [UNCATEGORIZED, "Software", UNCATEGORIZED]);
    }

    #[test]
    fn test_delete_category_reassigns_recurring_expenses() {
        let mut snapshot = Snapshot::default();
        BudgetService::new(&mut snapshot)
            .add_category("Travel", Money::from_dollars(300))
            .unwrap();
        let account = snapshot
            .create(Account::new("Checking", AccountType::Bank))
            .unwrap()
            .id;
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let profile = snapshot
            .create(
                RecurringExpense::new("Flights", account, Money::from_dollars(200), Frequency::Monthly, start)
                    .in_category("Travel"),
            )
            .unwrap()
            .id;

        BudgetService::new(&mut snapshot).delete_category("travel").unwrap();

        let profile = snapshot.get::<RecurringExpense>(&profile).unwrap();
        assert_eq!(profile.data.category, UNCATEGORIZED);

        // The generated transaction lands in a category that still exists
        let outcome = crate::scheduler::tick(&snapshot, start).unwrap();
        let txn = &outcome.snapshot.transactions[0];
        assert_eq!(txn.data.category, UNCATEGORIZED);
        let mut next = outcome.snapshot.clone();
        assert!(next
            .patch::<Transaction>(&txn.id, &serde_json::json!({"description": "renamed"}))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_recurring_expense_needs_known_category() {
        let mut snapshot = Snapshot::default();
        let profile = RecurringExpense::new(
            "Flights",
            AccountId::from_raw("acc-1"),
            Money::from_dollars(200),
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(snapshot.create(profile.clone().in_category("Travel")).is_err());
        assert!(snapshot.create(profile.in_category("marketing")).is_ok());
    }

    #[test]
    fn test_delete_unknown_or_uncategorized() {
        let mut snapshot = Snapshot::default();
        let mut service = BudgetService::new(&mut snapshot);

        assert_eq!(service.delete_category("Travel").unwrap(), None);
        assert!(service.delete_category("Uncategorized").is_err());
        assert_eq!(snapshot.budgets.len(), 4);
    }

    #[test]
    fn test_set_ceiling() {
        let mut snapshot = Snapshot::default();
        let mut service = BudgetService::new(&mut snapshot);

        let updated = service
            .set_ceiling("marketing", Money::from_dollars(1500))
            .unwrap()
            .unwrap();
        assert_eq!(updated.budget, Money::from_dollars(1500));
        assert_eq!(service.set_ceiling("Travel", Money::zero()).unwrap(), None);
    }
}
