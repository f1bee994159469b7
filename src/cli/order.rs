//! Sales and purchase order CLI commands

use clap::Subcommand;

use crate::display::format_order_list;
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::models::{PurchaseOrder, SalesOrder};
use crate::store::display_number;

use super::parse::{
    find_customer, find_purchase_order, find_sales_order, find_vendor, parse_date,
    parse_line_items,
};

const SALES_ORDER_NUMBER_BASE: usize = 103;
const PURCHASE_ORDER_NUMBER_BASE: usize = 503;

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Create a draft sales order for a customer
    CreateSales {
        /// Customer name or ID
        customer: String,
        /// Line item as "description:quantity:price" (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Order date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Create a draft purchase order with a vendor
    CreatePurchase {
        /// Vendor name or ID
        vendor: String,
        /// Line item as "description:quantity:price" (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Order date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Expected delivery date (YYYY-MM-DD), defaults to the order date
        #[arg(long)]
        delivery: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List sales and purchase orders
    List,
    /// Convert a sales order into a draft invoice
    #[command(name = "convert-so")]
    ConvertSo {
        /// Order number (e.g. SO-103) or ID
        order: String,
    },
    /// Convert a purchase order into a draft bill
    #[command(name = "convert-po")]
    ConvertPo {
        /// Order number (e.g. PO-503) or ID
        order: String,
    },
}

pub fn handle_order_command(ledger: &mut Ledger, cmd: OrderCommands) -> LedgerResult<()> {
    match cmd {
        OrderCommands::CreateSales {
            customer,
            items,
            date,
            notes,
        } => {
            let customer_id = find_customer(ledger.snapshot(), &customer)?.id.clone();
            let line_items = parse_line_items(&items)?;
            let date = parse_date(date.as_deref(), ledger.today())?;
            let number = display_number(
                "SO",
                ledger.snapshot().sales_orders.len(),
                SALES_ORDER_NUMBER_BASE,
            );

            let mut order = SalesOrder::new(number, customer_id, line_items, date);
            order.notes = notes.unwrap_or_default();

            let record = ledger.create(order)?;
            println!("Created sales order {} ({})", record.data.order_id, record.data.total);
        }

        OrderCommands::CreatePurchase {
            vendor,
            items,
            date,
            delivery,
            notes,
        } => {
            let vendor_id = find_vendor(ledger.snapshot(), &vendor)?.id.clone();
            let line_items = parse_line_items(&items)?;
            let date = parse_date(date.as_deref(), ledger.today())?;
            let delivery_date = parse_date(delivery.as_deref(), date)?;
            let number = display_number(
                "PO",
                ledger.snapshot().purchase_orders.len(),
                PURCHASE_ORDER_NUMBER_BASE,
            );

            let mut order = PurchaseOrder::new(number, vendor_id, line_items, date, delivery_date);
            order.notes = notes.unwrap_or_default();

            let record = ledger.create(order)?;
            println!(
                "Created purchase order {} ({})",
                record.data.order_id, record.data.total
            );
        }

        OrderCommands::List => {
            let snapshot = ledger.snapshot();
            print!(
                "{}",
                format_order_list(snapshot, &snapshot.sales_orders, &snapshot.purchase_orders)
            );
        }

        OrderCommands::ConvertSo { order } => {
            let found = find_sales_order(ledger.snapshot(), &order)?;
            let (id, number) = (found.id.clone(), found.data.order_id.clone());

            match ledger.convert_sales_order_to_invoice(&id) {
                Some(invoice) => println!(
                    "Converted {} into invoice {} (due {})",
                    number, invoice.data.invoice_id, invoice.data.due_date
                ),
                None => println!("{} has already been invoiced", number),
            }
        }

        OrderCommands::ConvertPo { order } => {
            let found = find_purchase_order(ledger.snapshot(), &order)?;
            let (id, number) = (found.id.clone(), found.data.order_id.clone());

            match ledger.convert_purchase_order_to_bill(&id) {
                Some(bill) => println!(
                    "Converted {} into bill {} (due {})",
                    number, bill.data.bill_id, bill.data.due_date
                ),
                None => println!("{} has already been billed", number),
            }
        }
    }

    Ok(())
}
