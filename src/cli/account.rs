//! Account CLI commands

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Account, AccountType, Money};
use crate::reports::AccountBalancesReport;
use crate::services::find_account;

use super::parse::parse_money;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (bank, credit, cash)
        #[arg(short = 't', long, default_value = "bank")]
        account_type: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        balance: String,
        /// Last four digits of the account or card number
        #[arg(long)]
        last4: Option<String>,
    },
    /// List accounts with their current balances
    List,
    /// Delete an account together with its transactions and recurring expenses
    Delete {
        /// Account name or ID
        account: String,
    },
}

pub fn handle_account_command(ledger: &mut Ledger, cmd: AccountCommands) -> LedgerResult<()> {
    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            balance,
            last4,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: bank, credit, cash",
                    account_type
                ))
            })?;

            let mut opening = parse_money(&balance)?;
            // Card balances are debt; users type them as positive numbers
            if account_type == AccountType::CreditCard && opening.is_positive() {
                opening = Money::from_cents(-opening.cents());
            }

            let mut account = Account::new(name, account_type).with_opening_balance(opening);
            if let Some(last4) = last4 {
                account = account.with_last4(last4);
            }

            let record = ledger.create(account)?;
            println!("Created account: {}", record.data.name);
            println!("  Type: {}", record.data.account_type);
            println!("  Opening Balance: {}", record.data.opening_balance);
            println!("  ID: {}", record.id);
        }

        AccountCommands::List => {
            if ledger.snapshot().accounts.is_empty() {
                println!("No accounts found.");
            } else {
                print!("{}", AccountBalancesReport::generate(ledger.snapshot()).format_terminal());
            }
        }

        AccountCommands::Delete { account } => {
            let found = find_account(ledger.snapshot(), &account)
                .ok_or_else(|| LedgerError::not_found("Account", &account))?;
            let (id, name) = (found.id.clone(), found.data.name.clone());

            let report = ledger.delete_account_and_transactions(&id);
            println!("Deleted account: {}", name);
            println!("  Transactions removed: {}", report.transactions_removed);
            println!(
                "  Recurring expenses removed: {}",
                report.recurring_expenses_removed
            );
        }
    }

    Ok(())
}
