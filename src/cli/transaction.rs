//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_transaction_list;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Direction, Transaction};
use crate::services::find_account;

use super::parse::{parse_date, parse_money};

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a transaction
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Budget category
        #[arg(short, long)]
        category: Option<String>,
        /// Account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Record money coming in instead of going out
        #[arg(long)]
        inflow: bool,
    },
    /// List transactions, newest first
    List {
        /// Filter by account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

pub fn handle_transaction_command(
    ledger: &mut Ledger,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            category,
            account,
            date,
            inflow,
        } => {
            let amount = parse_money(&amount)?;
            let date = parse_date(date.as_deref(), ledger.today())?;
            let direction = if inflow {
                Direction::Inflow
            } else {
                Direction::Outflow
            };

            let mut txn = Transaction::new(date, description, amount, direction);
            if let Some(category) = category {
                // Store the budget's own spelling
                let category = ledger
                    .snapshot()
                    .budget(&category)
                    .map(|b| b.category.clone())
                    .unwrap_or(category);
                txn = txn.in_category(category);
            }
            if let Some(account) = account {
                let found = find_account(ledger.snapshot(), &account)
                    .ok_or_else(|| LedgerError::not_found("Account", &account))?;
                txn = txn.in_account(found.id.clone());
            }

            let record = ledger.create(txn)?;
            println!("Added transaction: {}", record.data);
            println!("  ID: {}", record.id);
        }

        TransactionCommands::List {
            account,
            category,
            limit,
        } => {
            let snapshot = ledger.snapshot();
            let account_id = match account {
                Some(account) => Some(
                    find_account(snapshot, &account)
                        .ok_or_else(|| LedgerError::not_found("Account", &account))?
                        .id
                        .clone(),
                ),
                None => None,
            };

            let mut transactions: Vec<_> = snapshot
                .transactions
                .iter()
                .filter(|t| account_id.is_none() || t.data.account_id == account_id)
                .filter(|t| {
                    category
                        .as_deref()
                        .map_or(true, |c| t.data.category.eq_ignore_ascii_case(c))
                })
                .collect();
            transactions.sort_by(|a, b| b.data.date.cmp(&a.data.date));
            transactions.truncate(limit);

            print!(
                "{}",
                format_transaction_list(
                    snapshot,
                    &transactions,
                    &settings.date_format,
                    &settings.currency_symbol
                )
            );
        }
    }

    Ok(())
}
