//! Budget Spending Report
//!
//! Aggregates outflows per budget category for one calendar month and
//! compares them with each category's ceiling. This is where a budget's
//! `spent` figure comes from; the stored value is never trusted.

use chrono::{Datelike, NaiveDate};

use crate::models::{Budget, Money, UNCATEGORIZED};
use crate::store::Snapshot;

/// One budget category in the report
#[derive(Debug, Clone)]
pub struct BudgetSpendingRow {
    pub category: String,
    pub budget: Money,
    pub spent: Money,
    pub transaction_count: usize,
}

impl BudgetSpendingRow {
    pub fn remaining(&self) -> Money {
        self.budget - self.spent
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.budget && !self.budget.is_zero()
    }

    /// Spent as a percentage of the ceiling (0 when there is no ceiling)
    pub fn percent_used(&self) -> f64 {
        if self.budget.is_zero() {
            0.0
        } else {
            self.spent.cents() as f64 / self.budget.cents() as f64 * 100.0
        }
    }
}

/// Spending per budget category for a month
#[derive(Debug, Clone)]
pub struct BudgetSpendingReport {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<BudgetSpendingRow>,
    pub total_budget: Money,
    pub total_spent: Money,
}

impl BudgetSpendingReport {
    /// Generate the report for the month containing `date`
    pub fn generate(snapshot: &Snapshot, date: NaiveDate) -> Self {
        let (year, month) = (date.year(), date.month());

        let in_month: Vec<_> = snapshot
            .transactions
            .iter()
            .map(|record| &record.data)
            .filter(|txn| txn.is_outflow() && txn.date.year() == year && txn.date.month() == month)
            .collect();

        let mut rows: Vec<BudgetSpendingRow> = snapshot
            .budgets
            .iter()
            .map(|budget| {
                let matching: Vec<_> = in_month
                    .iter()
                    .filter(|txn| budget.matches(&txn.category))
                    .collect();
                BudgetSpendingRow {
                    category: budget.category.clone(),
                    budget: budget.budget,
                    spent: matching.iter().map(|txn| txn.amount).sum(),
                    transaction_count: matching.len(),
                }
            })
            .collect();

        // Categories deleted from the budget list still count as uncategorized
        let orphaned: Vec<_> = in_month
            .iter()
            .filter(|txn| !snapshot.budgets.iter().any(|b| b.matches(&txn.category)))
            .collect();
        if !orphaned.is_empty() {
            let spent: Money = orphaned.iter().map(|txn| txn.amount).sum();
            match rows.iter_mut().find(|row| row.category == UNCATEGORIZED) {
                Some(row) => {
                    row.spent += spent;
                    row.transaction_count += orphaned.len();
                }
                None => rows.push(BudgetSpendingRow {
                    category: UNCATEGORIZED.to_string(),
                    budget: Money::zero(),
                    spent,
                    transaction_count: orphaned.len(),
                }),
            }
        }

        Self {
            year,
            month,
            total_budget: rows.iter().map(|row| row.budget).sum(),
            total_spent: rows.iter().map(|row| row.spent).sum(),
            rows,
        }
    }

    /// The budgets with `spent` filled in from this report
    pub fn budgets(&self) -> Vec<Budget> {
        self.rows
            .iter()
            .map(|row| Budget {
                category: row.category.clone(),
                budget: row.budget,
                spent: row.spent,
            })
            .collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget: {}-{:02}\n", self.year, self.month));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>6}\n",
            "Category", "Budget", "Spent", "Remaining", "%"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for row in &self.rows {
            let marker = if row.is_over() { " OVER" } else { "" };
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>5.0}%{}\n",
                row.category,
                row.budget,
                row.spent,
                row.remaining(),
                row.percent_used(),
                marker
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12}\n",
            "TOTAL",
            self.total_budget,
            self.total_spent,
            self.total_budget - self.total_spent
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_spending_for_month() {
        let mut snapshot = Snapshot::default();
        for (day, amount, category) in [
            (date(3, 1), 200, "Software"),
            (date(3, 9), 450, "software"),
            (date(4, 1), 999, "Software"),
            (date(3, 4), 1200, "Marketing"),
        ] {
            snapshot
                .create(Transaction::outflow(day, "x", Money::from_dollars(amount)).in_category(category))
                .unwrap();
        }
        snapshot
            .create(Transaction::inflow(date(3, 2), "Sale", Money::from_dollars(5000)).in_category("Software"))
            .unwrap();

        let report = BudgetSpendingReport::generate(&snapshot, date(3, 15));
        let software = &report.rows[0];
        assert_eq!(software.spent, Money::from_dollars(650));
        assert_eq!(software.transaction_count, 2);
        assert!(software.is_over());
        assert_eq!(software.remaining(), Money::from_dollars(-150));

        let marketing = &report.rows[1];
        assert!(marketing.is_over());
        assert_eq!(report.total_spent, Money::from_dollars(1850));
        assert_eq!(report.budgets()[0].spent, Money::from_dollars(650));
    }

    #[test]
    fn test_orphaned_categories_count_as_uncategorized() {
        let mut snapshot = Snapshot::default();
        let txn = Transaction::outflow(date(5, 1), "Old", Money::from_dollars(30));
        let id = snapshot.create(txn).unwrap().id;
        snapshot.update::<Transaction, _>(&id, |t| t.category = "Deleted".into());

        let report = BudgetSpendingReport::generate(&snapshot, date(5, 20));
        let uncategorized = report
            .rows
            .iter()
            .find(|row| row.category == UNCATEGORIZED)
            .unwrap();
        assert_eq!(uncategorized.spent, Money::from_dollars(30));
        assert!(!uncategorized.is_over());
    }
}
