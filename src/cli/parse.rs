//! Argument parsing and record lookup shared by the CLI commands

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::line_item::validate_line_items;
use crate::models::{
    Bill, Customer, Invoice, LineItem, Money, PaymentMethod, PurchaseOrder, RecordId, SalesOrder,
    Vendor,
};
use crate::store::{Entity, Record, Snapshot};

/// Parse a dollar amount such as "1250", "1,250.00" or "$12.50"
pub fn parse_money(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '1000.00' or '1000'. Error: {}",
            s, e
        ))
    })
}

/// Parse a YYYY-MM-DD date, defaulting to `today` when absent
pub fn parse_date(s: Option<&str>, today: NaiveDate) -> LedgerResult<NaiveDate> {
    match s {
        None => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            LedgerError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s))
        }),
    }
}

/// Parse a YYYY-MM month into its first day
pub fn parse_month(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| LedgerError::Validation(format!("Invalid month: '{}'. Use YYYY-MM", s)))
}

pub fn parse_method(s: &str) -> LedgerResult<PaymentMethod> {
    PaymentMethod::parse(s).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid payment method: '{}'. Valid methods: card, bank, paypal",
            s
        ))
    })
}

/// Parse a line item written as `description:quantity:price`
///
/// The description may itself contain colons; quantity and price are taken
/// from the right.
pub fn parse_line_item(s: &str) -> LedgerResult<LineItem> {
    let invalid = || {
        LedgerError::Validation(format!(
            "Invalid line item: '{}'. Use 'description:quantity:price'",
            s
        ))
    };

    let mut parts = s.rsplitn(3, ':');
    let price = parts.next().ok_or_else(invalid)?;
    let quantity = parts.next().ok_or_else(invalid)?;
    let description = parts.next().ok_or_else(invalid)?.trim();
    if description.is_empty() {
        return Err(invalid());
    }

    let quantity: u32 = quantity.trim().parse().map_err(|_| invalid())?;
    let price = parse_money(price)?;
    LineItem::new(description, quantity, price)
}

pub fn parse_line_items(items: &[String]) -> LedgerResult<Vec<LineItem>> {
    if items.is_empty() {
        return Err(LedgerError::Validation(
            "At least one --item is required".into(),
        ));
    }
    let items = items
        .iter()
        .map(|item| parse_line_item(item))
        .collect::<LedgerResult<Vec<_>>>()?;
    validate_line_items(&items)?;
    Ok(items)
}

/// Find a record by id, or by a display value such as a name or number
fn find_by<'s, T, F>(snapshot: &'s Snapshot, identifier: &str, display: F) -> Option<&'s Record<T>>
where
    T: Entity,
    F: Fn(&T) -> &str,
{
    let wanted = identifier.trim();
    let bare = wanted.trim_start_matches('#');
    snapshot.records::<T>().iter().find(|record| {
        let shown = display(&record.data);
        record.id.as_str() == wanted
            || shown.eq_ignore_ascii_case(wanted)
            || shown.trim_start_matches('#').eq_ignore_ascii_case(bare)
    })
}

pub fn find_customer<'s>(snapshot: &'s Snapshot, identifier: &str) -> LedgerResult<&'s Record<Customer>> {
    find_by::<Customer, _>(snapshot, identifier, |c| &c.name)
        .ok_or_else(|| LedgerError::not_found("Customer", identifier))
}

pub fn find_vendor<'s>(snapshot: &'s Snapshot, identifier: &str) -> LedgerResult<&'s Record<Vendor>> {
    find_by::<Vendor, _>(snapshot, identifier, |v| &v.name)
        .ok_or_else(|| LedgerError::not_found("Vendor", identifier))
}

pub fn find_invoice<'s>(snapshot: &'s Snapshot, identifier: &str) -> LedgerResult<&'s Record<Invoice>> {
    find_by::<Invoice, _>(snapshot, identifier, |i| &i.invoice_id)
        .ok_or_else(|| LedgerError::not_found("Invoice", identifier))
}

pub fn find_bill<'s>(snapshot: &'s Snapshot, identifier: &str) -> LedgerResult<&'s Record<Bill>> {
    find_by::<Bill, _>(snapshot, identifier, |b| &b.bill_id)
        .ok_or_else(|| LedgerError::not_found("Bill", identifier))
}

pub fn find_sales_order<'s>(snapshot: &'s Snapshot, identifier: &str) -> LedgerResult<&'s Record<SalesOrder>> {
    find_by::<SalesOrder, _>(snapshot, identifier, |o| &o.order_id)
        .ok_or_else(|| LedgerError::not_found("Sales order", identifier))
}

pub fn find_purchase_order<'s>(
    snapshot: &'s Snapshot,
    identifier: &str,
) -> LedgerResult<&'s Record<PurchaseOrder>> {
    find_by::<PurchaseOrder, _>(snapshot, identifier, |o| &o.order_id)
        .ok_or_else(|| LedgerError::not_found("Purchase order", identifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_item() {
        let item = parse_line_item("Design: phase 1:2:450.50").unwrap();
        assert_eq!(item.description, "Design: phase 1");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.total, Money::from_cents(90100));

        assert!(parse_line_item("no-price").is_err());
        assert!(parse_line_item(":1:10").is_err());
        assert!(parse_line_item("Widget:-1:10").is_err());
        assert!(parse_line_items(&[]).is_err());

        // quantity x price past i64 cents
        assert!(parse_line_item("x:4294967295:90000000000").is_err());
        let huge = "x:4294967295:15000000".to_string();
        assert!(parse_line_item(&huge).is_ok());
        assert!(parse_line_items(&[huge.clone(), huge]).is_err());
    }

    #[test]
    fn test_parse_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(parse_date(None, today).unwrap(), today);
        assert_eq!(
            parse_date(Some("2024-02-29"), today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date(Some("02/29/2024"), today).is_err());
        assert_eq!(
            parse_month("2024-03").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_month("March").is_err());
    }

    #[test]
    fn test_find_by_name_number_or_id() {
        let mut snapshot = Snapshot::default();
        let acme = snapshot.create(Customer::new("Acme")).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let invoice = snapshot
            .create(Invoice::new(
                "#INV-1004",
                acme.id.clone(),
                vec![LineItem::new("Work", 1, Money::from_dollars(10)).unwrap()],
                date,
            ))
            .unwrap();

        assert_eq!(find_customer(&snapshot, "acme").unwrap().id, acme.id);
        assert_eq!(find_customer(&snapshot, acme.id.as_str()).unwrap().id, acme.id);
        assert_eq!(find_invoice(&snapshot, "INV-1004").unwrap().id, invoice.id);
        assert_eq!(find_invoice(&snapshot, "#inv-1004").unwrap().id, invoice.id);
        assert!(find_invoice(&snapshot, "INV-9999").unwrap_err().is_not_found());
    }
}
