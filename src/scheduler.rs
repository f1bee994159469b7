//! Recurrence scheduler
//!
//! `tick` is a pure function from a snapshot and a date to the next
//! snapshot. It promotes past-due documents to Overdue and fires every due
//! recurring profile once. A profile that is several periods behind fires
//! once per tick; repeated ticks catch it up.

use std::fmt;
use std::ops::AddAssign;

use chrono::NaiveDate;

use crate::models::document::net_30_due_date;
use crate::models::{
    Bill, BillStatus, Invoice, InvoiceStatus, Schedule, Totals, Transaction, NET_30,
};
use crate::services::conversion::GENERATED_NUMBER_BASE;
use crate::store::{display_number, Snapshot};

/// Notes stamped on every document a profile generates
pub const GENERATED_NOTES: &str = "Generated from recurring profile.";

/// Counts of what a tick changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub invoices_overdue: usize,
    pub bills_overdue: usize,
    pub invoices_generated: usize,
    pub bills_generated: usize,
    pub transactions_generated: usize,
}

impl TickReport {
    pub fn total(&self) -> usize {
        self.invoices_overdue
            + self.bills_overdue
            + self.invoices_generated
            + self.bills_generated
            + self.transactions_generated
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl AddAssign for TickReport {
    fn add_assign(&mut self, other: Self) {
        self.invoices_overdue += other.invoices_overdue;
        self.bills_overdue += other.bills_overdue;
        self.invoices_generated += other.invoices_generated;
        self.bills_generated += other.bills_generated;
        self.transactions_generated += other.transactions_generated;
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} invoice(s) and {} bill(s) marked overdue; generated {} invoice(s), {} bill(s), {} transaction(s)",
            self.invoices_overdue,
            self.bills_overdue,
            self.invoices_generated,
            self.bills_generated,
            self.transactions_generated
        )
    }
}

/// The snapshot after a tick that changed something
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub snapshot: Snapshot,
    pub report: TickReport,
}

/// Run one scheduler pass as of `today`
///
/// Returns None when nothing was due, so callers can skip the commit.
pub fn tick(snapshot: &Snapshot, today: NaiveDate) -> Option<TickOutcome> {
    let mut next = snapshot.clone();

    let report = TickReport {
        invoices_overdue: promote_overdue_invoices(&mut next, today),
        bills_overdue: promote_overdue_bills(&mut next, today),
        invoices_generated: generate_invoices(&mut next, today),
        bills_generated: generate_bills(&mut next, today),
        transactions_generated: generate_expenses(&mut next, today),
    };

    if report.is_empty() {
        None
    } else {
        Some(TickOutcome {
            snapshot: next,
            report,
        })
    }
}

fn promote_overdue_invoices(snapshot: &mut Snapshot, today: NaiveDate) -> usize {
    let mut promoted = 0;
    for invoice in &mut snapshot.invoices {
        if invoice.data.is_past_due(today) {
            invoice.data.status = InvoiceStatus::Overdue;
            promoted += 1;
        }
    }
    promoted
}

fn promote_overdue_bills(snapshot: &mut Snapshot, today: NaiveDate) -> usize {
    let mut promoted = 0;
    for bill in &mut snapshot.bills {
        if bill.data.is_past_due(today) {
            bill.data.status = BillStatus::Overdue;
            promoted += 1;
        }
    }
    promoted
}

fn generate_invoices(snapshot: &mut Snapshot, today: NaiveDate) -> usize {
    let mut generated = 0;
    for index in 0..snapshot.recurring_invoices.len() {
        let profile = &mut snapshot.recurring_invoices[index].data;
        if !profile.is_due(today) {
            continue;
        }
        let date = profile.advance();
        let totals = Totals::from_stored_total(&profile.line_items, profile.total);

        let invoice = Invoice {
            invoice_id: display_number("INV", snapshot.invoices.len(), GENERATED_NUMBER_BASE),
            customer_id: profile.customer_id.clone(),
            sales_order_id: None,
            line_items: profile.line_items.clone(),
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            status: InvoiceStatus::Draft,
            date,
            due_date: net_30_due_date(date),
            payment_terms: NET_30.to_string(),
            notes: GENERATED_NOTES.to_string(),
        };
        snapshot.insert(invoice);
        generated += 1;
    }
    generated
}

fn generate_bills(snapshot: &mut Snapshot, today: NaiveDate) -> usize {
    let mut generated = 0;
    for index in 0..snapshot.recurring_bills.len() {
        let profile = &mut snapshot.recurring_bills[index].data;
        if !profile.is_due(today) {
            continue;
        }
        let date = profile.advance();
        let totals = Totals::from_stored_total(&profile.line_items, profile.total);

        let bill = Bill {
            bill_id: display_number("BILL", snapshot.bills.len(), GENERATED_NUMBER_BASE),
            vendor_id: profile.vendor_id.clone(),
            purchase_order_id: None,
            line_items: profile.line_items.clone(),
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            status: BillStatus::Unpaid,
            date,
            due_date: net_30_due_date(date),
            notes: GENERATED_NOTES.to_string(),
        };
        snapshot.insert(bill);
        generated += 1;
    }
    generated
}

fn generate_expenses(snapshot: &mut Snapshot, today: NaiveDate) -> usize {
    let mut generated = 0;
    for index in 0..snapshot.recurring_expenses.len() {
        let profile = &mut snapshot.recurring_expenses[index].data;
        if !profile.is_due(today) {
            continue;
        }
        let date = profile.advance();

        let txn = Transaction::outflow(date, profile.description.clone(), profile.amount)
            .in_account(profile.account_id.clone())
            .in_category(profile.category.clone());
        snapshot.insert(txn);
        generated += 1;
    }
    generated
}
