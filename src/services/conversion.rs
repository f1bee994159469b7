//! Order conversion
//!
//! Turns a sales order into an invoice and a purchase order into a bill.
//! An order is converted at most once: its status moves to Invoiced or
//! Billed and further conversions are ignored.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::document::net_30_due_date;
use crate::models::{
    Bill, BillStatus, Invoice, InvoiceStatus, PurchaseOrder, PurchaseOrderId,
    PurchaseOrderStatus, SalesOrder, SalesOrderId, SalesOrderStatus, NET_30,
};
use crate::store::{display_number, Record, Snapshot};

/// Base of `#INV-` and `#BILL-` numbers for generated documents
pub const GENERATED_NUMBER_BASE: usize = 1001;

/// Service for converting orders into billing documents
pub struct ConversionService<'a> {
    snapshot: &'a mut Snapshot,
    today: NaiveDate,
}

impl<'a> ConversionService<'a> {
    pub fn new(snapshot: &'a mut Snapshot, today: NaiveDate) -> Self {
        Self { snapshot, today }
    }

    /// Issue a Net 30 draft invoice for a sales order
    ///
    /// Returns None when the order doesn't exist or was already invoiced.
    pub fn sales_order_to_invoice(&mut self, id: &SalesOrderId) -> Option<Record<Invoice>> {
        let Some(order) = self.snapshot.get::<SalesOrder>(id) else {
            debug!(sales_order = %id, "conversion of unknown sales order ignored");
            return None;
        };
        if order.data.status == SalesOrderStatus::Invoiced {
            debug!(sales_order = %id, "sales order already invoiced");
            return None;
        }
        let order = &order.data;

        let invoice = Invoice {
            invoice_id: display_number("INV", self.snapshot.invoices.len(), GENERATED_NUMBER_BASE),
            customer_id: order.customer_id.clone(),
            sales_order_id: Some(id.clone()),
            line_items: order.line_items.clone(),
            sub_total: order.sub_total,
            tax: order.tax,
            total: order.total,
            status: InvoiceStatus::Draft,
            date: self.today,
            due_date: net_30_due_date(self.today),
            payment_terms: NET_30.to_string(),
            notes: order.notes.clone(),
        };

        self.snapshot
            .update::<SalesOrder, _>(id, |order| order.status = SalesOrderStatus::Invoiced);
        Some(self.snapshot.insert(invoice))
    }

    /// Issue a draft bill for a purchase order, due on its delivery date
    ///
    /// Returns None when the order doesn't exist or was already billed.
    pub fn purchase_order_to_bill(&mut self, id: &PurchaseOrderId) -> Option<Record<Bill>> {
        let Some(order) = self.snapshot.get::<PurchaseOrder>(id) else {
            debug!(purchase_order = %id, "conversion of unknown purchase order ignored");
            return None;
        };
        if order.data.status == PurchaseOrderStatus::Billed {
            debug!(purchase_order = %id, "purchase order already billed");
            return None;
        }
        let order = &order.data;

        let bill = Bill {
            bill_id: display_number("BILL", self.snapshot.bills.len(), GENERATED_NUMBER_BASE),
            vendor_id: order.vendor_id.clone(),
            purchase_order_id: Some(id.clone()),
            line_items: order.line_items.clone(),
            sub_total: order.sub_total,
            tax: order.tax,
            total: order.total,
            status: BillStatus::Draft,
            date: self.today,
            due_date: order.delivery_date,
            notes: format!("From PO {}", order.order_id),
        };

        self.snapshot
            .update::<PurchaseOrder, _>(id, |order| order.status = PurchaseOrderStatus::Billed);
        Some(self.snapshot.insert(bill))
    }
}
