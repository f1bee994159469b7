//! bizledger - local ledger engine for a small business
//!
//! This library owns every financial record of a small business (accounts,
//! transactions, customers and vendors, sales and purchase orders, invoices,
//! bills, recurring profiles, payments and budget categories) in a single
//! in-memory snapshot that is persisted as JSON after every change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models and money/id types
//! - `store`: Entity registry and the `Snapshot` collections
//! - `storage`: Snapshot persistence (JSON file, in-memory) and migration
//! - `services`: Cross-entity workflows (payments, cascades, budgets, conversions)
//! - `scheduler`: Recurring profile materialization and overdue promotion
//! - `ledger`: The `Ledger` facade that commits every operation
//! - `reports`: Read-only derivations (balances, budget spending, cash flow)
//! - `import`: CSV import
//! - `config`: Paths and user settings
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use bizledger::clock::SystemClock;
//! use bizledger::config::LedgerPaths;
//! use bizledger::storage::JsonFileStore;
//! use bizledger::Ledger;
//!
//! let paths = LedgerPaths::new()?;
//! let mut ledger = Ledger::open(
//!     Box::new(JsonFileStore::from_paths(&paths)?),
//!     Box::new(SystemClock),
//! );
//! ledger.refresh();
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod import;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod scheduler;
pub mod services;
pub mod storage;
pub mod store;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use scheduler::TickReport;
pub use store::{Entity, EntityKind, Record, Snapshot};
