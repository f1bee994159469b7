//! CSV import CLI command

use std::fs;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::import::import_csv;
use crate::ledger::Ledger;
use crate::store::EntityKind;

/// Import `file` into the `kind` collection
pub fn handle_import_command(ledger: &mut Ledger, kind: EntityKind, file: &Path) -> LedgerResult<()> {
    let text = fs::read_to_string(file)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", file.display(), e)))?;

    let imported = import_csv(ledger, kind, &text)?;
    println!("{} records imported successfully!", imported.len());
    Ok(())
}
