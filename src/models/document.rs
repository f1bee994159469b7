//! Order and billing documents
//!
//! Sales side: `SalesOrder` converts into `Invoice`. Purchase side:
//! `PurchaseOrder` converts into `Bill`. Each carries a human-facing display
//! number next to its id.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CustomerId, PurchaseOrderId, SalesOrderId, VendorId};
use super::line_item::{LineItem, Totals};
use super::money::Money;

/// Days between an invoice date and its due date
pub const NET_DAYS: u64 = 30;

/// Payment terms stamped on generated invoices
pub const NET_30: &str = "Net 30";

/// Due date for a document issued on `date` under Net 30 terms
pub fn net_30_due_date(date: NaiveDate) -> NaiveDate {
    date + Days::new(NET_DAYS)
}

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Parse a status name (case-insensitive)
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|status| status.to_string().eq_ignore_ascii_case(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant => f.write_str(stringify!($variant))),+
                }
            }
        }
    };
}

status_enum!(
    /// Lifecycle of an invoice
    InvoiceStatus { Draft, Sent, Paid, Overdue, Cancelled }
);

status_enum!(
    /// Lifecycle of a sales order
    SalesOrderStatus { Draft, Sent, Fulfilled, Invoiced, Cancelled }
);

status_enum!(
    /// Lifecycle of a bill
    BillStatus { Draft, Unpaid, Paid, Overdue }
);

status_enum!(
    /// Lifecycle of a purchase order
    PurchaseOrderStatus { Draft, Sent, Received, Billed, Cancelled }
);

/// An order from a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    /// Display number, e.g. "#SO-103"
    pub order_id: String,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub sub_total: Money,
    #[serde(default)]
    pub tax: Money,
    pub total: Money,
    pub status: SalesOrderStatus,
    pub date: NaiveDate,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub notes: String,
}

impl SalesOrder {
    pub fn new(
        order_id: impl Into<String>,
        customer_id: CustomerId,
        line_items: Vec<LineItem>,
        date: NaiveDate,
    ) -> Self {
        let totals = Totals::from_line_items(&line_items);
        Self {
            order_id: order_id.into(),
            customer_id,
            line_items,
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            status: SalesOrderStatus::Draft,
            date,
            shipping_address: String::new(),
            notes: String::new(),
        }
    }
}

/// An invoice issued to a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Display number, e.g. "#INV-1001"
    pub invoice_id: String,
    pub customer_id: CustomerId,
    /// Originating sales order, for converted invoices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_order_id: Option<SalesOrderId>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub sub_total: Money,
    #[serde(default)]
    pub tax: Money,
    pub total: Money,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub notes: String,
}

impl Invoice {
    /// Draft invoice on Net 30 terms
    pub fn new(
        invoice_id: impl Into<String>,
        customer_id: CustomerId,
        line_items: Vec<LineItem>,
        date: NaiveDate,
    ) -> Self {
        let totals = Totals::from_line_items(&line_items);
        Self {
            invoice_id: invoice_id.into(),
            customer_id,
            sales_order_id: None,
            line_items,
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            status: InvoiceStatus::Draft,
            date,
            due_date: net_30_due_date(date),
            payment_terms: NET_30.to_string(),
            notes: String::new(),
        }
    }

    /// Whether the due date has passed while the invoice is still awaiting payment
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Sent && self.due_date < today
    }
}

/// An order placed with a vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    /// Display number, e.g. "#PO-503"
    pub order_id: String,
    pub vendor_id: VendorId,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub sub_total: Money,
    #[serde(default)]
    pub tax: Money,
    pub total: Money,
    pub status: PurchaseOrderStatus,
    pub date: NaiveDate,
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub notes: String,
}

impl PurchaseOrder {
    pub fn new(
        order_id: impl Into<String>,
        vendor_id: VendorId,
        line_items: Vec<LineItem>,
        date: NaiveDate,
        delivery_date: NaiveDate,
    ) -> Self {
        let totals = Totals::from_line_items(&line_items);
        Self {
            order_id: order_id.into(),
            vendor_id,
            line_items,
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            status: PurchaseOrderStatus::Draft,
            date,
            delivery_date,
            shipping_address: String::new(),
            notes: String::new(),
        }
    }
}

/// A bill received from a vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Display number, e.g. "#BILL-1001"
    pub bill_id: String,
    pub vendor_id: VendorId,
    /// Originating purchase order, for converted bills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_order_id: Option<PurchaseOrderId>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub sub_total: Money,
    #[serde(default)]
    pub tax: Money,
    pub total: Money,
    pub status: BillStatus,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Bill {
    /// Unpaid bill due on `due_date`
    pub fn new(
        bill_id: impl Into<String>,
        vendor_id: VendorId,
        line_items: Vec<LineItem>,
        date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        let totals = Totals::from_line_items(&line_items);
        Self {
            bill_id: bill_id.into(),
            vendor_id,
            purchase_order_id: None,
            line_items,
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            status: BillStatus::Unpaid,
            date,
            due_date,
            notes: String::new(),
        }
    }

    /// Whether the due date has passed while the bill is still unpaid
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status == BillStatus::Unpaid && self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!(InvoiceStatus::parse("overdue"), Some(InvoiceStatus::Overdue));
        assert_eq!(BillStatus::parse("UNPAID"), Some(BillStatus::Unpaid));
        assert_eq!(SalesOrderStatus::parse("shipped"), None);
        assert_eq!(PurchaseOrderStatus::Received.to_string(), "Received");
        assert_eq!(
            serde_json::to_string(&SalesOrderStatus::Invoiced).unwrap(),
            "\"Invoiced\""
        );
    }

    #[test]
    fn test_new_invoice_is_net_30_draft() {
        let items = vec![LineItem::new("Audit", 2, Money::from_dollars(150)).unwrap()];
        let invoice = Invoice::new("#INV-1004", CustomerId::from_raw("cus-1"), items, date(2024, 1, 1));
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.due_date, date(2024, 1, 31));
        assert_eq!(invoice.payment_terms, NET_30);
        assert_eq!(invoice.total, Money::from_dollars(300));
    }

    #[test]
    fn test_past_due_only_for_awaiting_statuses() {
        let mut invoice = Invoice::new("#INV-1", CustomerId::from_raw("c"), vec![], date(2024, 1, 1));
        let later = date(2024, 3, 1);
        assert!(!invoice.is_past_due(later)); // Draft
        invoice.status = InvoiceStatus::Sent;
        assert!(invoice.is_past_due(later));
        assert!(!invoice.is_past_due(invoice.due_date));

        let mut bill = Bill::new("#BILL-1", VendorId::from_raw("v"), vec![], date(2024, 1, 1), date(2024, 1, 10));
        assert!(bill.is_past_due(date(2024, 1, 11)));
        bill.status = BillStatus::Paid;
        assert!(!bill.is_past_due(date(2024, 1, 11)));
    }

    #[test]
    fn test_invoice_json_field_names() {
        let invoice = Invoice::new("#INV-1", CustomerId::from_raw("c"), vec![], date(2024, 1, 1));
        let json = serde_json::to_value(&invoice).unwrap();
        assert!(json.get("subTotal").is_some());
        assert_eq!(json["dueDate"], "2024-01-31");
        assert!(json.get("salesOrderId").is_none());
    }
}
