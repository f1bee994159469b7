//! Core data models for bizledger
//!
//! This module contains the data structures that represent the ledger
//! domain: accounts, transactions, counterparties, budgets, order and
//! billing documents, recurring profiles and payments.
//!
//! Entity structs hold every field except the id; the store pairs them with
//! a typed id in `store::Record`.

pub mod account;
pub mod achievement;
pub mod budget;
pub mod document;
pub mod ids;
pub mod line_item;
pub mod money;
pub mod party;
pub mod payment;
pub mod recurring;
pub mod transaction;

pub use account::{Account, AccountType};
pub use achievement::Achievement;
pub use budget::{Budget, UNCATEGORIZED};
pub use document::{
    Bill, BillStatus, Invoice, InvoiceStatus, PurchaseOrder, PurchaseOrderStatus, SalesOrder,
    SalesOrderStatus, NET_30,
};
pub use ids::{
    AccountId, AchievementId, BillId, CustomerId, InvoiceId, LineItemId, PaymentMadeId,
    PaymentReceivedId, PurchaseOrderId, RecordId, RecurringBillId, RecurringExpenseId,
    RecurringInvoiceId, SalesOrderId, TransactionId, VendorId,
};
pub use line_item::{LineItem, Totals};
pub use money::Money;
pub use party::{Customer, Vendor};
pub use payment::{PaymentDetails, PaymentMade, PaymentMethod, PaymentReceived};
pub use recurring::{
    Frequency, ProfileStatus, RecurringBill, RecurringExpense, RecurringInvoice, Schedule,
};
pub use transaction::{Direction, Transaction};
