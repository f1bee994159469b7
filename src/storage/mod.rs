//! Persistence layer for bizledger
//!
//! The whole ledger is one JSON document. `SnapshotStore` abstracts where
//! that document lives: a file on disk with atomic writes, or memory.

pub mod file_io;
pub mod migration;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::store::Snapshot;

pub use file_io::{read_json, write_json_atomic};

/// A place the ledger snapshot can be read from and written to
pub trait SnapshotStore {
    /// The stored document, or None when nothing has been saved yet
    fn load(&self) -> LedgerResult<Option<Value>>;

    fn save(&self, snapshot: &Snapshot) -> LedgerResult<()>;

    /// Forget the stored document
    fn clear(&self) -> LedgerResult<()>;
}

/// Snapshot stored as a single pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the ledger file of the given paths, creating directories
    pub fn from_paths(paths: &LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(paths.ledger_file()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> LedgerResult<Option<Value>> {
        file_io::read_json_value(&self.path)
    }

    fn save(&self, snapshot: &Snapshot) -> LedgerResult<()> {
        write_json_atomic(&self.path, snapshot)
    }

    fn clear(&self) -> LedgerResult<()> {
        file_io::remove_if_exists(&self.path)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    stored: Option<Value>,
    fail_saves: bool,
    saves: usize,
}

/// Snapshot kept in memory
///
/// Clones share the same underlying state, so a caller can hand one clone to
/// a `Ledger` and inspect what was saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously stored document
    pub fn with_stored(value: Value) -> Self {
        let store = Self::new();
        store.state.borrow_mut().stored = Some(value);
        store
    }

    /// Make every following save fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.state.borrow_mut().fail_saves = fail;
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.state.borrow().saves
    }

    /// The last saved document
    pub fn stored(&self) -> Option<Value> {
        self.state.borrow().stored.clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> LedgerResult<Option<Value>> {
        Ok(self.state.borrow().stored.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> LedgerResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_saves {
            return Err(LedgerError::Storage("memory store is failing saves".into()));
        }
        state.stored = Some(serde_json::to_value(snapshot)?);
        state.saves += 1;
        Ok(())
    }

    fn clear(&self) -> LedgerResult<()> {
        self.state.borrow_mut().stored = None;
        Ok(())
    }
}

/// Load the snapshot from a store, falling back to the default snapshot
///
/// Never fails: a missing document yields the defaults, and an unreadable
/// one is logged and also yields the defaults.
pub fn load_snapshot(store: &dyn SnapshotStore) -> Snapshot {
    let raw = match store.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no stored ledger, starting from defaults");
            return Snapshot::default();
        }
        Err(e) => {
            warn!(error = %e, "failed to read stored ledger, starting from defaults");
            return Snapshot::default();
        }
    };

    match decode_snapshot(raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "stored ledger is invalid, starting from defaults");
            Snapshot::default()
        }
    }
}

/// Migrate and decode a stored document
pub fn decode_snapshot(raw: Value) -> LedgerResult<Snapshot> {
    let Value::Object(mut map) = raw else {
        return Err(LedgerError::Storage(
            "stored ledger is not a JSON object".into(),
        ));
    };
    migration::migrate(&mut map);
    Ok(serde_json::from_value(Value::Object(map))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordId};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_nothing_stored_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_snapshot(&store), Snapshot::default());
    }

    #[test]
    fn test_missing_keys_take_defaults_and_stored_keys_win() {
        let store = MemoryStore::with_stored(json!({
            "budgets": [{"category": "Rent", "budget": 150000, "spent": 0}],
            "customers": [{"id": "cus-1", "name": "Acme"}]
        }));
        let snapshot = load_snapshot(&store);

        assert_eq!(snapshot.budgets.len(), 1);
        assert_eq!(snapshot.budgets[0].budget, Money::from_dollars(1500));
        assert_eq!(snapshot.customers[0].data.name, "Acme");
        assert_eq!(snapshot.achievements.len(), 6);
        assert!(snapshot.recurring_bills.is_empty());
    }

    #[test]
    fn test_legacy_clients_are_migrated() {
        let store = MemoryStore::with_stored(json!({
            "clients": [{"id": "c1", "name": "Legacy Co"}]
        }));
        let snapshot = load_snapshot(&store);
        assert_eq!(snapshot.customers.len(), 1);
        assert_eq!(snapshot.customers[0].id.as_str(), "c1");

        let saved = serde_json::to_value(&snapshot).unwrap();
        assert!(saved.get("clients").is_none());
    }

    #[test]
    fn test_corrupt_data_falls_back() {
        let store = MemoryStore::with_stored(json!({"accounts": "not a list"}));
        assert_eq!(load_snapshot(&store), Snapshot::default());

        let store = MemoryStore::with_stored(json!([1, 2, 3]));
        assert_eq!(load_snapshot(&store), Snapshot::default());
    }

    #[test]
    fn test_memory_store_failures_and_counts() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.save(&Snapshot::default()).unwrap();
        assert_eq!(handle.save_count(), 1);
        assert!(handle.stored().is_some());

        handle.set_fail_saves(true);
        assert!(store.save(&Snapshot::default()).is_err());
        assert_eq!(handle.save_count(), 1);

        store.clear().unwrap();
        assert!(handle.stored().is_none());
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = JsonFileStore::from_paths(&paths).unwrap();
        assert!(store.load().unwrap().is_none());

        let mut snapshot = Snapshot::default();
        snapshot.create(crate::models::Customer::new("Acme")).unwrap();
        store.save(&snapshot).unwrap();
        assert!(store.path().exists());
        assert_eq!(load_snapshot(&store), snapshot);

        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_json_file_store_corrupt_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("ledger.json"));
        std::fs::write(store.path(), "garbage").unwrap();
        assert_eq!(load_snapshot(&store), Snapshot::default());
    }
}
