//! Reports module for bizledger
//!
//! Read-only derivations of the snapshot: account balances, spending per
//! budget category and monthly cash flow.

pub mod balances;
pub mod budget_spending;
pub mod cash_flow;

pub use balances::{AccountBalancesReport, AccountSummary};
pub use budget_spending::{BudgetSpendingReport, BudgetSpendingRow};
pub use cash_flow::{CashFlowReport, CashFlowRow};
