//! String-keyed access to the entity store
//!
//! The CLI and the CSV importer address collections by their snapshot key
//! and carry records as JSON. These functions decode the JSON into the
//! collection's model and run the typed operation.

use serde_json::Value;

use crate::error::{LedgerError, LedgerResult};
use crate::models::RecordId;

use super::entity::{with_entity_type, Entity, EntityKind};
use super::snapshot::Snapshot;

fn decode<T: Entity>(value: Value) -> LedgerResult<T> {
    if let Some(fields) = value.as_object() {
        if fields.contains_key("id") {
            return Err(LedgerError::Validation(format!(
                "New {} records must not carry an id",
                T::KIND.label().to_lowercase()
            )));
        }
    }
    serde_json::from_value(value)
        .map_err(|e| LedgerError::Validation(format!("Invalid {}: {}", T::KIND.label(), e)))
}

fn encode<S: serde::Serialize>(value: &S) -> LedgerResult<Value> {
    Ok(serde_json::to_value(value)?)
}

impl Snapshot {
    /// Create a record from a JSON object without an `id` key
    pub fn create_raw(&mut self, kind: EntityKind, data: Value) -> LedgerResult<Value> {
        with_entity_type!(kind, T => {
            let record = self.create(decode::<T>(data)?)?;
            encode(&record)
        })
    }

    /// Merge a JSON object onto the record with the given id
    pub fn patch_raw(&mut self, kind: EntityKind, id: &str, patch: &Value) -> LedgerResult<Option<Value>> {
        with_entity_type!(kind, T => {
            let id = <T as Entity>::Id::from_raw(id);
            match self.patch::<T>(&id, patch)? {
                Some(record) => Ok(Some(encode(&record)?)),
                None => Ok(None),
            }
        })
    }

    /// Remove the record with the given id; false when it was absent
    pub fn delete_raw(&mut self, kind: EntityKind, id: &str) -> bool {
        with_entity_type!(kind, T => {
            let id = <T as Entity>::Id::from_raw(id);
            self.delete::<T>(&id)
        })
    }

    /// Append a batch of JSON objects, all or nothing
    pub fn import_raw(&mut self, kind: EntityKind, items: Vec<Value>) -> LedgerResult<Vec<Value>> {
        with_entity_type!(kind, T => {
            let decoded = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    decode::<T>(item).map_err(|e| {
                        LedgerError::Validation(format!("Record {}: {}", index + 1, e))
                    })
                })
                .collect::<LedgerResult<Vec<T>>>()?;
            self.import_batch(decoded)?
                .iter()
                .map(encode)
                .collect()
        })
    }

    /// Every record of a collection as JSON
    pub fn list_raw(&self, kind: EntityKind) -> LedgerResult<Vec<Value>> {
        with_entity_type!(kind, T => {
            self.records::<T>().iter().map(encode).collect()
        })
    }

    /// One record as JSON
    pub fn get_raw(&self, kind: EntityKind, id: &str) -> LedgerResult<Option<Value>> {
        with_entity_type!(kind, T => {
            let id = <T as Entity>::Id::from_raw(id);
            self.get::<T>(&id).map(encode).transpose()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_raw_decodes_and_mints_id() {
        let mut snapshot = Snapshot::default();
        let created = snapshot
            .create_raw(EntityKind::Vendors, json!({"name": "Paper Co", "email": "ap@paper.test"}))
            .unwrap();
        let id = created["id"].as_str().unwrap();
        assert!(id.starts_with("ven-"));
        assert_eq!(created["email"], "ap@paper.test");
        assert_eq!(snapshot.vendors.len(), 1);
    }

    #[test]
    fn test_create_raw_rejects_id_and_bad_fields() {
        let mut snapshot = Snapshot::default();
        let err = snapshot
            .create_raw(EntityKind::Customers, json!({"id": "cus-1", "name": "Acme"}))
            .unwrap_err();
        assert!(err.is_validation());

        let err = snapshot
            .create_raw(EntityKind::Accounts, json!({"name": "Checking", "type": "Savings"}))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(snapshot.customers.is_empty());
        assert!(snapshot.accounts.is_empty());
    }

    fn invoice_body(price: i64, quantity: u32, line_total: i64, sub_total: i64, total: i64) -> Value {
        json!({
            "invoiceId": "#INV-1004",
            "customerId": "cus-1",
            "lineItems": [{"description": "Work", "quantity": quantity, "price": price, "total": line_total}],
            "subTotal": sub_total,
            "total": total,
            "status": "Draft",
            "date": "2024-01-01",
            "dueDate": "2024-01-31"
        })
    }

    #[test]
    fn test_create_raw_checks_document_totals() {
        let mut snapshot = Snapshot::default();

        for bad in [
            invoice_body(-500, 1, -500, -500, -500),
            invoice_body(500, 1, 999, 999, 999),
            invoice_body(500, 2, 1000, 900, 900),
            invoice_body(500, 2, 1000, 1000, 1200),
        ] {
            let err = snapshot.create_raw(EntityKind::Invoices, bad).unwrap_err();
            assert!(err.is_validation());
        }
        assert!(snapshot.invoices.is_empty());

        let created = snapshot
            .create_raw(EntityKind::Invoices, invoice_body(500, 2, 1000, 1000, 1000))
            .unwrap();
        assert_eq!(created["total"], 1000);
    }

    #[test]
    fn test_recurring_profiles_allow_tax_but_not_negative_totals() {
        let mut snapshot = Snapshot::default();
        let profile = |total: i64| {
            json!({
                "vendorId": "ven-1",
                "lineItems": [{"description": "Hosting", "quantity": 1, "price": 4000, "total": 4000}],
                "frequency": "Monthly",
                "startDate": "2024-01-01",
                "nextDate": "2024-01-01",
                "total": total
            })
        };

        assert!(snapshot.create_raw(EntityKind::RecurringBills, profile(4400)).is_ok());
        assert!(snapshot.create_raw(EntityKind::RecurringBills, profile(-1)).is_err());
        assert_eq!(snapshot.recurring_bills.len(), 1);
    }

    #[test]
    fn test_payments_not_creatable_raw() {
        let mut snapshot = Snapshot::default();
        let payment = json!({
            "paymentId": "#PAY-100",
            "customerId": "cus-1",
            "customerName": "Acme",
            "invoiceId": "inv-1",
            "date": "2024-01-01",
            "method": "PayPal",
            "amount": 100
        });
        assert!(snapshot.create_raw(EntityKind::PaymentsReceived, payment).is_err());
    }

    #[test]
    fn test_patch_and_delete_raw() {
        let mut snapshot = Snapshot::default();
        let created = snapshot
            .create_raw(EntityKind::Customers, json!({"name": "Acme"}))
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let patched = snapshot
            .patch_raw(EntityKind::Customers, &id, &json!({"phone": "555-0199"}))
            .unwrap()
            .unwrap();
        assert_eq!(patched["phone"], "555-0199");
        assert_eq!(snapshot.get_raw(EntityKind::Customers, &id).unwrap().unwrap()["phone"], "555-0199");

        assert!(snapshot
            .patch_raw(EntityKind::Customers, "cus-missing", &json!({"phone": "1"}))
            .unwrap()
            .is_none());

        assert!(snapshot.delete_raw(EntityKind::Customers, &id));
        assert!(!snapshot.delete_raw(EntityKind::Customers, &id));
    }

    #[test]
    fn test_import_raw_is_all_or_nothing() {
        let mut snapshot = Snapshot::default();
        let rows = vec![
            json!({"date": "2024-01-02", "description": "Ads", "amount": 5000, "type": "outflow", "category": "Marketing"}),
            json!({"date": "2024-01-03", "description": "Sale", "amount": 12000, "type": "inflow"}),
            json!({"date": "2024-01-04", "description": "Trip", "amount": 800, "type": "outflow", "category": "Travel"}),
        ];
        let err = snapshot.import_raw(EntityKind::Transactions, rows.clone()).unwrap_err();
        assert!(err.to_string().contains("Record 3"));
        assert!(snapshot.transactions.is_empty());

        let imported = snapshot.import_raw(EntityKind::Transactions, rows[..2].to_vec()).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(snapshot.transactions[0].data.description, "Ads");
        assert_eq!(snapshot.transactions[1].data.category, "Uncategorized");
    }

    #[test]
    fn test_list_raw() {
        let snapshot = Snapshot::default();
        let achievements = snapshot.list_raw(EntityKind::Achievements).unwrap();
        assert_eq!(achievements.len(), 6);
        assert_eq!(achievements[0]["id"], "a1");
    }
}
