//! Ledger status overview

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::models::{BillStatus, InvoiceStatus, Money, ProfileStatus};
use crate::reports::AccountBalancesReport;

/// Format a one-screen summary of the ledger
pub fn format_status(ledger: &Ledger, settings: &Settings) -> String {
    let snapshot = ledger.snapshot();
    let symbol = settings.currency_symbol.as_str();

    let receivable: Money = snapshot
        .invoices
        .iter()
        .filter(|i| matches!(i.data.status, InvoiceStatus::Sent | InvoiceStatus::Overdue))
        .map(|i| i.data.total)
        .sum();
    let payable: Money = snapshot
        .bills
        .iter()
        .filter(|b| matches!(b.data.status, BillStatus::Unpaid | BillStatus::Overdue))
        .map(|b| b.data.total)
        .sum();
    let overdue_invoices = snapshot
        .invoices
        .iter()
        .filter(|i| i.data.status == InvoiceStatus::Overdue)
        .count();
    let overdue_bills = snapshot
        .bills
        .iter()
        .filter(|b| b.data.status == BillStatus::Overdue)
        .count();
    let active_profiles = snapshot
        .recurring_invoices
        .iter()
        .filter(|p| p.data.status == ProfileStatus::Active)
        .count()
        + snapshot
            .recurring_bills
            .iter()
            .filter(|p| p.data.status == ProfileStatus::Active)
            .count()
        + snapshot
            .recurring_expenses
            .iter()
            .filter(|p| p.data.status == ProfileStatus::Active)
            .count();

    let balances = AccountBalancesReport::generate(snapshot);

    let mut output = String::new();
    output.push_str(&format!("Ledger status as of {}\n", ledger.today().format(&settings.date_format)));
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!("{:<24} {:>14}\n", "Cash on hand", balances.total.format_with_symbol(symbol)));
    output.push_str(&format!("{:<24} {:>14}\n", "Receivable", receivable.format_with_symbol(symbol)));
    output.push_str(&format!("{:<24} {:>14}\n", "Payable", payable.format_with_symbol(symbol)));
    output.push('\n');
    output.push_str(&format!("{:<24} {:>14}\n", "Accounts", snapshot.accounts.len()));
    output.push_str(&format!("{:<24} {:>14}\n", "Transactions", snapshot.transactions.len()));
    output.push_str(&format!("{:<24} {:>14}\n", "Customers", snapshot.customers.len()));
    output.push_str(&format!("{:<24} {:>14}\n", "Vendors", snapshot.vendors.len()));
    output.push_str(&format!(
        "{:<24} {:>14}\n",
        "Invoices (overdue)",
        format!("{} ({})", snapshot.invoices.len(), overdue_invoices)
    ));
    output.push_str(&format!(
        "{:<24} {:>14}\n",
        "Bills (overdue)",
        format!("{} ({})", snapshot.bills.len(), overdue_bills)
    ));
    output.push_str(&format!("{:<24} {:>14}\n", "Active recurring", active_profiles));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{Account, AccountType};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    #[test]
    fn test_status_summary() {
        let mut ledger = Ledger::open(
            Box::new(MemoryStore::new()),
            Box::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())),
        );
        ledger
            .create(Account::new("Checking", AccountType::Bank).with_opening_balance(Money::from_dollars(250)))
            .unwrap();

        let text = format_status(&ledger, &Settings::default());
        assert!(text.contains("2024-05-01"));
        assert!(text.contains("$250.00"));
        assert!(text.contains("Accounts"));
    }
}
