//! Transaction display formatting

use crate::models::{Account, Transaction};
use crate::store::{Record, Snapshot};

use super::truncate;

fn account_name<'s>(snapshot: &'s Snapshot, txn: &Transaction) -> &'s str {
    txn.account_id
        .as_ref()
        .and_then(|id| snapshot.get::<Account>(id))
        .map(|record| record.data.name.as_str())
        .unwrap_or("")
}

/// Format transactions as a register, newest first as given
pub fn format_transaction_list(
    snapshot: &Snapshot,
    transactions: &[&Record<Transaction>],
    date_format: &str,
    currency_symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {:<24} {:<16} {:<16} {:>12}\n",
        "Date", "Description", "Category", "Account", "Amount"
    ));
    output.push_str(&"-".repeat(82));
    output.push('\n');

    for record in transactions {
        let txn = &record.data;
        output.push_str(&format!(
            "{:<10} {:<24} {:<16} {:<16} {:>12}\n",
            txn.date.format(date_format).to_string(),
            truncate(&txn.description, 24),
            truncate(&txn.category, 16),
            truncate(account_name(snapshot, txn), 16),
            txn.signed_amount().format_with_symbol(currency_symbol)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_register_shows_signed_amounts_and_account() {
        let mut snapshot = Snapshot::default();
        let account = snapshot.create(Account::new("Checking", AccountType::Bank)).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let txn = snapshot
            .create(Transaction::outflow(day, "Figma", Money::from_cents(1500)).in_account(account.id))
            .unwrap();

        let text = format_transaction_list(&snapshot, &[&txn], "%Y-%m-%d", "$");
        assert!(text.contains("2024-03-15"));
        assert!(text.contains("Checking"));
        assert!(text.contains("-$15.00"));

        assert_eq!(
            format_transaction_list(&snapshot, &[], "%Y-%m-%d", "$"),
            "No transactions found.\n"
        );
    }
}
