//! Upgrades for snapshots written by older versions
//!
//! Migrations run on the raw JSON object before it is decoded, so they can
//! rename or drop keys the current `Snapshot` no longer knows.

use serde_json::{Map, Value};
use tracing::info;

/// Apply every migration to a stored snapshot object
pub fn migrate(raw: &mut Map<String, Value>) {
    rename_clients_to_customers(raw);
}

/// Counterparties used to be stored under `clients`
///
/// The legacy list is adopted only when no `customers` list exists yet. The
/// `clients` key is dropped either way.
fn rename_clients_to_customers(raw: &mut Map<String, Value>) {
    let Some(clients) = raw.remove("clients") else {
        return;
    };

    if raw.contains_key("customers") {
        info!("dropping legacy clients list, customers already present");
    } else {
        info!("migrating legacy clients list to customers");
        raw.insert("customers".to_string(), clients);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_clients_become_customers() {
        let mut raw = object(json!({"clients": [{"id": "c1", "name": "Acme"}]}));
        migrate(&mut raw);
        assert!(raw.get("clients").is_none());
        assert_eq!(raw["customers"][0]["name"], "Acme");
    }

    #[test]
    fn test_existing_customers_win() {
        let mut raw = object(json!({
            "clients": [{"id": "c1", "name": "Old"}],
            "customers": [{"id": "c2", "name": "New"}]
        }));
        migrate(&mut raw);
        assert!(raw.get("clients").is_none());
        assert_eq!(raw["customers"].as_array().unwrap().len(), 1);
        assert_eq!(raw["customers"][0]["name"], "New");
    }

    #[test]
    fn test_no_legacy_keys_is_untouched() {
        let mut raw = object(json!({"customers": []}));
        let before = raw.clone();
        migrate(&mut raw);
        assert_eq!(raw, before);
    }
}
