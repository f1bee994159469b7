//! Report CLI commands

use chrono::{Datelike, Months, NaiveDate};
use clap::Subcommand;

use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::reports::{AccountBalancesReport, BudgetSpendingReport, CashFlowReport};

use super::parse::{parse_date, parse_month};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Current balance of every account
    Balances,
    /// Spending against each budget category for a month
    Budget {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Monthly inflow, outflow and net
    CashFlow {
        /// Start date (YYYY-MM-DD), defaults to six months back
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<String>,
    },
}

/// First day of the month five months before `today`, so the window covers
/// six calendar months
fn six_months_back(today: NaiveDate) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    first.checked_sub_months(Months::new(5)).unwrap_or(first)
}

pub fn handle_report_command(ledger: &Ledger, cmd: ReportCommands) -> LedgerResult<()> {
    let snapshot = ledger.snapshot();
    let today = ledger.today();

    match cmd {
        ReportCommands::Balances => {
            print!("{}", AccountBalancesReport::generate(snapshot).format_terminal());
        }
        ReportCommands::Budget { month } => {
            let date = match month {
                Some(month) => parse_month(&month)?,
                None => today,
            };
            print!("{}", BudgetSpendingReport::generate(snapshot, date).format_terminal());
        }
        ReportCommands::CashFlow { from, to } => {
            let start = parse_date(from.as_deref(), six_months_back(today))?;
            let end = parse_date(to.as_deref(), today)?;
            print!("{}", CashFlowReport::generate(snapshot, start, end).format_terminal());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_months_back() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
        assert_eq!(six_months_back(today), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
