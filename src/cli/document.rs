//! Invoice and bill CLI commands

use chrono::Days;
use clap::Subcommand;

use crate::display::{format_bill_list, format_invoice_list};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Bill, BillStatus, Invoice, InvoiceStatus, PaymentDetails};
use crate::store::display_number;

use super::parse::{
    find_bill, find_customer, find_invoice, find_vendor, parse_date, parse_line_items,
    parse_method, parse_money,
};

/// Numbering base for invoices and bills entered by hand
pub const DOCUMENT_NUMBER_BASE: usize = 1004;

#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Create a draft invoice
    Create {
        /// Customer name or ID
        customer: String,
        /// Line item as "description:quantity:price" (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Invoice date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Mark an invoice as sent to the customer
    Send {
        /// Invoice number (e.g. INV-1004) or ID
        invoice: String,
    },
    /// List invoices
    List {
        /// Only show invoices with this status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Record a payment against an invoice and mark it paid
    Pay {
        /// Invoice number (e.g. INV-1004) or ID
        invoice: String,
        /// Amount received, defaults to the invoice total
        #[arg(short, long)]
        amount: Option<String>,
        /// Payment method (card, bank, paypal)
        #[arg(short, long, default_value = "bank")]
        method: String,
        /// Payment date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BillCommands {
    /// Enter an unpaid bill
    Create {
        /// Vendor name or ID
        vendor: String,
        /// Line item as "description:quantity:price" (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Bill date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Due date (YYYY-MM-DD), defaults to 30 days after the bill date
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List bills
    List {
        /// Only show bills with this status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Record a payment against a bill and mark it paid
    Pay {
        /// Bill number (e.g. BILL-1004) or ID
        bill: String,
        /// Amount paid, defaults to the bill total
        #[arg(short, long)]
        amount: Option<String>,
        /// Payment method (card, bank, paypal)
        #[arg(short, long, default_value = "bank")]
        method: String,
        /// Payment date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

fn parse_invoice_status(s: &str) -> LedgerResult<InvoiceStatus> {
    InvoiceStatus::parse(s)
        .ok_or_else(|| LedgerError::Validation(format!("Unknown invoice status: '{}'", s)))
}

fn parse_bill_status(s: &str) -> LedgerResult<BillStatus> {
    BillStatus::parse(s)
        .ok_or_else(|| LedgerError::Validation(format!("Unknown bill status: '{}'", s)))
}

pub fn handle_invoice_command(ledger: &mut Ledger, cmd: InvoiceCommands) -> LedgerResult<()> {
    match cmd {
        InvoiceCommands::Create {
            customer,
            items,
            date,
            notes,
        } => {
            let customer_id = find_customer(ledger.snapshot(), &customer)?.id.clone();
            let line_items = parse_line_items(&items)?;
            let date = parse_date(date.as_deref(), ledger.today())?;
            let number = display_number(
                "INV",
                ledger.snapshot().invoices.len(),
                DOCUMENT_NUMBER_BASE,
            );

            let mut invoice = Invoice::new(number, customer_id, line_items, date);
            invoice.notes = notes.unwrap_or_default();

            let record = ledger.create(invoice)?;
            println!("Created invoice {}", record.data.invoice_id);
            println!("  Total: {}", record.data.total);
            println!("  Due: {}", record.data.due_date);
            println!("  ID: {}", record.id);
        }

        InvoiceCommands::Send { invoice } => {
            let id = find_invoice(ledger.snapshot(), &invoice)?.id.clone();
            let updated = ledger
                .update::<Invoice, _>(&id, |i| i.status = InvoiceStatus::Sent)
                .ok_or_else(|| LedgerError::not_found("Invoice", &invoice))?;
            println!("Marked {} as sent", updated.data.invoice_id);
        }

        InvoiceCommands::List { status } => {
            let status = status.as_deref().map(parse_invoice_status).transpose()?;
            let snapshot = ledger.snapshot();
            let invoices: Vec<_> = snapshot
                .invoices
                .iter()
                .filter(|i| status.map_or(true, |s| i.data.status == s))
                .collect();
            print!("{}", format_invoice_list(snapshot, &invoices));
        }

        InvoiceCommands::Pay {
            invoice,
            amount,
            method,
            date,
        } => {
            let found = find_invoice(ledger.snapshot(), &invoice)?;
            let (id, total) = (found.id.clone(), found.data.total);
            let amount = match amount {
                Some(amount) => parse_money(&amount)?,
                None => total,
            };
            let details = PaymentDetails::new(
                amount,
                parse_date(date.as_deref(), ledger.today())?,
                parse_method(&method)?,
            );

            let payment = ledger
                .record_payment(&id, details)
                .ok_or_else(|| LedgerError::not_found("Invoice", &invoice))?;
            println!(
                "Recorded payment {} of {} from {}",
                payment.data.payment_id, payment.data.amount, payment.data.customer_name
            );
        }
    }

    Ok(())
}

pub fn handle_bill_command(ledger: &mut Ledger, cmd: BillCommands) -> LedgerResult<()> {
    match cmd {
        BillCommands::Create {
            vendor,
            items,
            date,
            due,
            notes,
        } => {
            let vendor_id = find_vendor(ledger.snapshot(), &vendor)?.id.clone();
            let line_items = parse_line_items(&items)?;
            let date = parse_date(date.as_deref(), ledger.today())?;
            let due_date = parse_date(due.as_deref(), date + Days::new(30))?;
            let number = display_number("BILL", ledger.snapshot().bills.len(), DOCUMENT_NUMBER_BASE);

            let mut bill = Bill::new(number, vendor_id, line_items, date, due_date);
            bill.notes = notes.unwrap_or_default();

            let record = ledger.create(bill)?;
            println!("Created bill {}", record.data.bill_id);
            println!("  Total: {}", record.data.total);
            println!("  Due: {}", record.data.due_date);
            println!("  ID: {}", record.id);
        }

        BillCommands::List { status } => {
            let status = status.as_deref().map(parse_bill_status).transpose()?;
            let snapshot = ledger.snapshot();
            let bills: Vec<_> = snapshot
                .bills
                .iter()
                .filter(|b| status.map_or(true, |s| b.data.status == s))
                .collect();
            print!("{}", format_bill_list(snapshot, &bills));
        }

        BillCommands::Pay {
            bill,
            amount,
            method,
            date,
        } => {
            let found = find_bill(ledger.snapshot(), &bill)?;
            let (id, total) = (found.id.clone(), found.data.total);
            let amount = match amount {
                Some(amount) => parse_money(&amount)?,
                None => total,
            };
            let details = PaymentDetails::new(
                amount,
                parse_date(date.as_deref(), ledger.today())?,
                parse_method(&method)?,
            );

            let payment = ledger
                .record_bill_payment(&id, details)
                .ok_or_else(|| LedgerError::not_found("Bill", &bill))?;
            println!(
                "Recorded payment {} of {}",
                payment.data.payment_id, payment.data.amount
            );
        }
    }

    Ok(())
}
