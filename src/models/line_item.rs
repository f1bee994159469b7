//! Line items and document totals

use serde::{Deserialize, Serialize};

use super::ids::LineItemId;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// One priced row on an order, invoice, bill or recurring profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: LineItemId,
    pub description: String,
    pub quantity: u32,
    /// Unit price
    pub price: Money,
    /// quantity × price
    pub total: Money,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, price: Money) -> LedgerResult<Self> {
        let description = description.into();
        let total = price.checked_times(quantity).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Line item '{}' is too large: {} x {}",
                description, quantity, price
            ))
        })?;
        Ok(Self {
            id: LineItemId::new(),
            description,
            quantity,
            price,
            total,
        })
    }

    fn validate(&self) -> LedgerResult<()> {
        if self.price.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Line item '{}' has a negative price",
                self.description
            )));
        }
        if self.price.checked_times(self.quantity) != Some(self.total) {
            return Err(LedgerError::Validation(format!(
                "Line item '{}' total {} is not {} x {}",
                self.description, self.total, self.quantity, self.price
            )));
        }
        Ok(())
    }
}

/// Sum of line item totals
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.total).sum()
}

/// Sum of line item totals, or None on overflow
pub fn checked_subtotal(items: &[LineItem]) -> Option<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |sum, item| sum.checked_add(item.total))
}

/// Check every line and return their sum
pub fn validate_line_items(items: &[LineItem]) -> LedgerResult<Money> {
    for item in items {
        item.validate()?;
    }
    checked_subtotal(items)
        .ok_or_else(|| LedgerError::Validation("Line item totals are too large".into()))
}

/// Checks shared by orders, invoices and bills
pub fn validate_document(items: &[LineItem], sub_total: Money, tax: Money, total: Money) -> LedgerResult<()> {
    let sum = validate_line_items(items)?;
    if sub_total != sum {
        return Err(LedgerError::Validation(format!(
            "Subtotal {} does not match the line items ({})",
            sub_total, sum
        )));
    }
    if total.is_negative() {
        return Err(LedgerError::Validation(format!("Total cannot be negative, got {}", total)));
    }
    if sub_total.checked_add(tax) != Some(total) {
        return Err(LedgerError::Validation(format!(
            "Total {} is not subtotal {} plus tax {}",
            total, sub_total, tax
        )));
    }
    Ok(())
}

/// Subtotal, tax and total of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub sub_total: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    /// Totals for freshly entered line items. Tax is not computed yet and
    /// is always zero.
    pub fn from_line_items(items: &[LineItem]) -> Self {
        let sub_total = subtotal(items);
        let tax = Money::zero();
        Self {
            sub_total,
            tax,
            total: sub_total + tax,
        }
    }

    /// Totals for a stored grand total, inferring tax as the difference
    /// between the total and the line item sum.
    pub fn from_stored_total(items: &[LineItem], total: Money) -> Self {
        let sub_total = subtotal(items);
        Self {
            sub_total,
            tax: total - sub_total,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = LineItem::new("Consulting hour", 3, Money::from_cents(12500)).unwrap();
        assert_eq!(item.total.cents(), 37500);
    }

    #[test]
    fn test_oversized_line_is_rejected() {
        let result = LineItem::new("x", u32::MAX, Money::from_cents(9_000_000_000_000));
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[test]
    fn test_document_checks() {
        let items = vec![LineItem::new("Widget", 2, Money::from_dollars(5)).unwrap()];
        let ten = Money::from_dollars(10);
        assert!(validate_document(&items, ten, Money::zero(), ten).is_ok());

        // Subtotal disagrees with the lines
        assert!(validate_document(&items, Money::from_dollars(9), Money::zero(), Money::from_dollars(9)).is_err());
        // Total is not subtotal plus tax
        assert!(validate_document(&items, ten, Money::zero(), Money::from_dollars(11)).is_err());

        let mut negative = items.clone();
        negative[0].price = Money::from_dollars(-5);
        negative[0].total = Money::from_dollars(-10);
        assert!(validate_document(&negative, -ten, Money::zero(), -ten).is_err());

        let mut wrong_total = items;
        wrong_total[0].total = Money::from_cents(999);
        assert!(validate_line_items(&wrong_total).is_err());
    }

    #[test]
    fn test_totals_have_zero_tax() {
        let items = vec![
            LineItem::new("Design", 1, Money::from_dollars(800)).unwrap(),
            LineItem::new("Hosting", 12, Money::from_dollars(20)).unwrap(),
        ];
        let totals = Totals::from_line_items(&items);
        assert_eq!(totals.sub_total, Money::from_dollars(1040));
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total, totals.sub_total);
    }

    #[test]
    fn test_stored_total_infers_tax() {
        let items = vec![LineItem::new("Retainer", 1, Money::from_dollars(100)).unwrap()];
        let totals = Totals::from_stored_total(&items, Money::from_dollars(108));
        assert_eq!(totals.tax, Money::from_dollars(8));
        assert_eq!(totals.sub_total + totals.tax, totals.total);
    }

    #[test]
    fn test_line_item_without_id_gets_one() {
        let item: LineItem = serde_json::from_str(
            r#"{"description":"Widget","quantity":2,"price":500,"total":1000}"#,
        )
        .unwrap();
        assert!(item.id.to_string().starts_with("li-"));
    }
}
