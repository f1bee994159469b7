//! Service layer for bizledger
//!
//! Services hold the cross-entity workflows. Each borrows a `Snapshot`
//! mutably and changes it in place; the `Ledger` decides whether the
//! result is committed.

pub mod account;
pub mod budget;
pub mod conversion;
pub mod payment;

pub use account::{find_account, AccountService, CascadeReport};
pub use budget::BudgetService;
pub use conversion::ConversionService;
pub use payment::PaymentService;
