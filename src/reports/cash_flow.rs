//! Cash Flow Report
//!
//! Monthly inflows, outflows and net movement across all transactions.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::Money;
use crate::store::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashFlowRow {
    pub year: i32,
    pub month: u32,
    pub inflow: Money,
    pub outflow: Money,
}

impl CashFlowRow {
    pub fn net(&self) -> Money {
        self.inflow - self.outflow
    }
}

/// Cash flow between two dates (inclusive), one row per month with activity
#[derive(Debug, Clone)]
pub struct CashFlowReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rows: Vec<CashFlowRow>,
}

impl CashFlowReport {
    pub fn generate(snapshot: &Snapshot, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let mut months: BTreeMap<(i32, u32), (Money, Money)> = BTreeMap::new();

        for txn in snapshot.transactions.iter().map(|record| &record.data) {
            if txn.date < start_date || txn.date > end_date {
                continue;
            }
            let entry = months
                .entry((txn.date.year(), txn.date.month()))
                .or_insert((Money::zero(), Money::zero()));
            if txn.is_inflow() {
                entry.0 += txn.amount;
            } else {
                entry.1 += txn.amount;
            }
        }

        let rows = months
            .into_iter()
            .map(|((year, month), (inflow, outflow))| CashFlowRow {
                year,
                month,
                inflow,
                outflow,
            })
            .collect();

        Self {
            start_date,
            end_date,
            rows,
        }
    }

    pub fn total_inflow(&self) -> Money {
        self.rows.iter().map(|row| row.inflow).sum()
    }

    pub fn total_outflow(&self) -> Money {
        self.rows.iter().map(|row| row.outflow).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Cash Flow: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Inflow", "Outflow", "Net"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                format!("{}-{:02}", row.year, row.month),
                row.inflow,
                row.outflow,
                row.net()
            ));
        }

        output.push_str(&"-".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.total_inflow(),
            self.total_outflow(),
            self.total_inflow() - self.total_outflow()
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
    fn test_monthly_rows() {
        let mut snapshot = Snapshot::default();
        snapshot.create(Transaction::inflow(date(1, 5), "Sale", Money::from_dollars(900))).unwrap();
        snapshot.create(Transaction::outflow(date(1, 20), "Rent", Money::from_dollars(600))).unwrap();
        snapshot.create(Transaction::outflow(date(3, 2), "Ads", Money::from_dollars(100))).unwrap();
        snapshot.create(Transaction::inflow(date(7, 1), "Late", Money::from_dollars(1))).unwrap();

        let report = CashFlowReport::generate(&snapshot, date(1, 1), date(6, 30));
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].net(), Money::from_dollars(300));
        assert_eq!((report.rows[1].year, report.rows[1].month), (2024, 3));
        assert_eq!(report.total_inflow(), Money::from_dollars(900));
        assert_eq!(report.total_outflow(), Money::from_dollars(700));
        assert!(report.format_terminal().contains("2024-03"));
    }
}
