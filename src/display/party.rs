//! Customer and vendor display formatting

use crate::models::{Customer, Vendor};
use crate::store::Record;

use super::truncate;

pub fn format_customer_list(customers: &[Record<Customer>]) -> String {
    if customers.is_empty() {
        return "No customers found.\n".to_string();
    }

    let name_width = customers
        .iter()
        .map(|c| c.data.name.len())
        .max()
        .unwrap_or(4)
        .clamp(4, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<28}  {:>11}  {:>7}  {}\n",
        "Name",
        "Email",
        "Reliability",
        "Overdue",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&"-".repeat(name_width + 80));
    output.push('\n');

    for record in customers {
        let c = &record.data;
        output.push_str(&format!(
            "{:<name_width$}  {:<28}  {:>10}%  {:>7}  {}\n",
            truncate(&c.name, name_width),
            truncate(&c.email, 28),
            c.reliability_score,
            c.overdue_payments,
            record.id,
            name_width = name_width,
        ));
    }

    output
}

pub fn format_vendor_list(vendors: &[Record<Vendor>]) -> String {
    if vendors.is_empty() {
        return "No vendors found.\n".to_string();
    }

    let name_width = vendors
        .iter()
        .map(|v| v.data.name.len())
        .max()
        .unwrap_or(4)
        .clamp(4, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<28}  {:<10}  {:>12}  {}\n",
        "Name",
        "Email",
        "Terms",
        "Total Spent",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&"-".repeat(name_width + 80));
    output.push('\n');

    for record in vendors {
        let v = &record.data;
        output.push_str(&format!(
            "{:<name_width$}  {:<28}  {:<10}  {:>12}  {}\n",
            truncate(&v.name, name_width),
            truncate(&v.email, 28),
            truncate(&v.payment_terms, 10),
            v.total_spent.to_string(),
            record.id,
            name_width = name_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Snapshot;

    #[test]
    fn test_lists() {
        let mut snapshot = Snapshot::default();
        assert_eq!(format_customer_list(&snapshot.customers), "No customers found.\n");

        snapshot.create(Customer::new("Acme").with_email("ap@acme.test")).unwrap();
        snapshot.create(Vendor::new("Paper Co")).unwrap();

        let customers = format_customer_list(&snapshot.customers);
        assert!(customers.contains("ap@acme.test"));
        assert!(customers.contains("100%"));

        let vendors = format_vendor_list(&snapshot.vendors);
        assert!(vendors.contains("Paper Co"));
        assert!(vendors.contains("Net 30"));
    }
}
