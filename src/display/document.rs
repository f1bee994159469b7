//! Invoice, bill and order display formatting

use crate::models::{Bill, Customer, CustomerId, Invoice, PurchaseOrder, SalesOrder, Vendor, VendorId};
use crate::store::{Record, Snapshot};

use super::truncate;

fn customer_name<'s>(snapshot: &'s Snapshot, customer: &CustomerId) -> &'s str {
    snapshot
        .get::<Customer>(customer)
        .map(|c| c.data.name.as_str())
        .unwrap_or("(unknown)")
}

fn vendor_name<'s>(snapshot: &'s Snapshot, vendor: &VendorId) -> &'s str {
    snapshot
        .get::<Vendor>(vendor)
        .map(|v| v.data.name.as_str())
        .unwrap_or("(unknown)")
}

fn header(output: &mut String, party: &str) {
    output.push_str(&format!(
        "{:<12} {:<22} {:<10} {:<10} {:<10} {:>12}\n",
        "Number", party, "Date", "Due", "Status", "Total"
    ));
    output.push_str(&"-".repeat(81));
    output.push('\n');
}

pub fn format_invoice_list(snapshot: &Snapshot, invoices: &[&Record<Invoice>]) -> String {
    if invoices.is_empty() {
        return "No invoices found.\n".to_string();
    }

    let mut output = String::new();
    header(&mut output, "Customer");
    for record in invoices {
        let inv = &record.data;
        output.push_str(&format!(
            "{:<12} {:<22} {:<10} {:<10} {:<10} {:>12}\n",
            inv.invoice_id,
            truncate(customer_name(snapshot, &inv.customer_id), 22),
            inv.date.to_string(),
            inv.due_date.to_string(),
            inv.status.to_string(),
            inv.total.to_string()
        ));
    }

    output
}

pub fn format_bill_list(snapshot: &Snapshot, bills: &[&Record<Bill>]) -> String {
    if bills.is_empty() {
        return "No bills found.\n".to_string();
    }

    let mut output = String::new();
    header(&mut output, "Vendor");
    for record in bills {
        let bill = &record.data;
        output.push_str(&format!(
            "{:<12} {:<22} {:<10} {:<10} {:<10} {:>12}\n",
            bill.bill_id,
            truncate(vendor_name(snapshot, &bill.vendor_id), 22),
            bill.date.to_string(),
            bill.due_date.to_string(),
            bill.status.to_string(),
            bill.total.to_string()
        ));
    }

    output
}

/// Sales orders followed by purchase orders
pub fn format_order_list(
    snapshot: &Snapshot,
    sales: &[Record<SalesOrder>],
    purchases: &[Record<PurchaseOrder>],
) -> String {
    if sales.is_empty() && purchases.is_empty() {
        return "No orders found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {:<9} {:<22} {:<10} {:<10} {:>12}\n",
        "Number", "Kind", "Party", "Date", "Status", "Total"
    ));
    output.push_str(&"-".repeat(78));
    output.push('\n');

    for record in sales {
        let order = &record.data;
        output.push_str(&format!(
            "{:<10} {:<9} {:<22} {:<10} {:<10} {:>12}\n",
            order.order_id,
            "Sales",
            truncate(customer_name(snapshot, &order.customer_id), 22),
            order.date.to_string(),
            order.status.to_string(),
            order.total.to_string()
        ));
    }
    for record in purchases {
        let order = &record.data;
        output.push_str(&format!(
            "{:<10} {:<9} {:<22} {:<10} {:<10} {:>12}\n",
            order.order_id,
            "Purchase",
            truncate(vendor_name(snapshot, &order.vendor_id), 22),
            order.date.to_string(),
            order.status.to_string(),
            order.total.to_string()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_invoice_list_resolves_customer_names() {
        let mut snapshot = Snapshot::default();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let acme = snapshot.create(Customer::new("Acme")).unwrap();
        let invoice = snapshot
            .create(Invoice::new(
                "#INV-1004",
                acme.id,
                vec![LineItem::new("Work", 2, Money::from_dollars(50)).unwrap()],
                day,
            ))
            .unwrap();

        let text = format_invoice_list(&snapshot, &[&invoice]);
        assert!(text.contains("#INV-1004"));
        assert!(text.contains("Acme"));
        assert!(text.contains("2024-01-31"));
        assert!(text.contains("$100.00"));
        assert_eq!(format_bill_list(&snapshot, &[]), "No bills found.\n");
    }

    #[test]
    fn test_order_list() {
        let mut snapshot = Snapshot::default();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let vendor = snapshot.create(Vendor::new("Paper Co")).unwrap();
        snapshot
            .create(PurchaseOrder::new("#PO-503", vendor.id, vec![], day, day))
            .unwrap();

        let text = format_order_list(&snapshot, &snapshot.sales_orders, &snapshot.purchase_orders);
        assert!(text.contains("#PO-503"));
        assert!(text.contains("Purchase"));
        assert!(text.contains("Paper Co"));
    }
}
