//! Budget CLI commands

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::reports::BudgetSpendingReport;

use super::parse::{parse_money, parse_month};

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Add a budget category
    Add {
        /// Category name
        category: String,
        /// Monthly ceiling (e.g., "500")
        #[arg(default_value = "0")]
        amount: String,
    },
    /// Delete a category; its transactions move to Uncategorized
    Delete {
        /// Category name
        category: String,
    },
    /// Change a category's monthly ceiling
    Set {
        /// Category name
        category: String,
        /// New monthly ceiling
        amount: String,
    },
    /// Show spending against each category
    List {
        /// Month to report (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

pub fn handle_budget_command(ledger: &mut Ledger, cmd: BudgetCommands) -> LedgerResult<()> {
    match cmd {
        BudgetCommands::Add { category, amount } => {
            let budget = ledger.add_budget_category(&category, parse_money(&amount)?)?;
            println!("Added budget category: {} ({})", budget.category, budget.budget);
        }

        BudgetCommands::Delete { category } => match ledger.delete_budget_category(&category)? {
            Some(moved) => {
                println!("Deleted budget category: {}", category);
                println!("  Transactions moved to Uncategorized: {}", moved);
            }
            None => return Err(LedgerError::category_not_found(category)),
        },

        BudgetCommands::Set { category, amount } => {
            let budget = ledger
                .set_budget_ceiling(&category, parse_money(&amount)?)?
                .ok_or_else(|| LedgerError::category_not_found(&category))?;
            println!("Updated {}: {} per month", budget.category, budget.budget);
        }

        BudgetCommands::List { month } => {
            let date = match month {
                Some(month) => parse_month(&month)?,
                None => ledger.today(),
            };
            print!(
                "{}",
                BudgetSpendingReport::generate(ledger.snapshot(), date).format_terminal()
            );
        }
    }

    Ok(())
}
