//! Account Balances Report
//!
//! Current balance of every account: opening balance plus the signed sum of
//! its transactions.

use crate::display::truncate;
use crate::models::{Account, AccountId, Money};
use crate::store::Snapshot;

/// One account with its computed balance
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub account: Account,
    /// Opening balance + inflows - outflows
    pub balance: Money,
    pub transaction_count: usize,
}

/// Balances of all accounts
#[derive(Debug, Clone)]
pub struct AccountBalancesReport {
    pub accounts: Vec<AccountSummary>,
    pub total: Money,
    /// Net amount of transactions not linked to any account
    pub unassigned: Money,
}

impl AccountBalancesReport {
    pub fn generate(snapshot: &Snapshot) -> Self {
        let accounts: Vec<AccountSummary> = snapshot
            .accounts
            .iter()
            .map(|record| {
                let linked: Vec<_> = snapshot
                    .transactions
                    .iter()
                    .filter(|txn| txn.data.account_id.as_ref() == Some(&record.id))
                    .collect();
                let movement: Money = linked.iter().map(|txn| txn.data.signed_amount()).sum();
                AccountSummary {
                    account_id: record.id.clone(),
                    account: record.data.clone(),
                    balance: record.data.opening_balance + movement,
                    transaction_count: linked.len(),
                }
            })
            .collect();

        let unassigned = snapshot
            .transactions
            .iter()
            .filter(|txn| txn.data.account_id.is_none())
            .map(|txn| txn.data.signed_amount())
            .sum();

        Self {
            total: accounts.iter().map(|summary| summary.balance).sum(),
            accounts,
            unassigned,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<30} {:<12} {:>6} {:>14}\n",
            "Account", "Type", "Txns", "Balance"
        ));
        output.push_str(&"-".repeat(65));
        output.push('\n');

        for summary in &self.accounts {
            output.push_str(&format!(
                "{:<30} {:<12} {:>6} {:>14}\n",
                truncate(&summary.account.name, 30),
                summary.account.account_type.to_string(),
                summary.transaction_count,
                summary.balance
            ));
        }

        output.push_str(&"-".repeat(65));
        output.push('\n');
        output.push_str(&format!("{:<50} {:>14}\n", "TOTAL", self.total));
        if !self.unassigned.is_zero() {
            output.push_str(&format!("{:<50} {:>14}\n", "Not linked to an account", self.unassigned));
        }

        output
    }
}
