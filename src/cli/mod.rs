//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger operations.

pub mod account;
pub mod budget;
pub mod document;
pub mod import;
pub mod order;
pub mod parse;
pub mod party;
pub mod record;
pub mod report;
pub mod status;
pub mod tick;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use document::{handle_bill_command, handle_invoice_command, BillCommands, InvoiceCommands};
pub use import::handle_import_command;
pub use order::{handle_order_command, OrderCommands};
pub use party::{handle_customer_command, handle_vendor_command, CustomerCommands, VendorCommands};
pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_report_command, ReportCommands};
pub use status::format_status;
pub use tick::{handle_tick_command, TickArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};
