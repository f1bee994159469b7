//! Generic record access by collection name
//!
//! Works on any id-keyed collection using JSON bodies, e.g.
//! `bizledger record create recurringExpenses '{"accountId": ...}'`.

use clap::Subcommand;
use serde_json::Value;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::store::EntityKind;

#[derive(Subcommand)]
pub enum RecordCommands {
    /// Create a record from a JSON object (without an id)
    Create {
        /// Collection, e.g. customers, salesOrders, recurring-invoices
        kind: EntityKind,
        /// JSON object with the record's fields
        json: String,
    },
    /// Merge a JSON object into an existing record
    Update {
        kind: EntityKind,
        id: String,
        /// JSON object with the fields to change
        json: String,
    },
    /// Delete a record
    Delete { kind: EntityKind, id: String },
    /// Print one record as JSON
    Show { kind: EntityKind, id: String },
    /// Print every record of a collection as JSON
    List { kind: EntityKind },
}

fn print_json(value: &Value) -> LedgerResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_body(json: &str) -> LedgerResult<Value> {
    serde_json::from_str(json)
        .map_err(|e| LedgerError::Validation(format!("Invalid JSON body: {}", e)))
}

pub fn handle_record_command(ledger: &mut Ledger, cmd: RecordCommands) -> LedgerResult<()> {
    match cmd {
        RecordCommands::Create { kind, json } => {
            let created = ledger.create_raw(kind, parse_body(&json)?)?;
            print_json(&created)?;
        }
        RecordCommands::Update { kind, id, json } => {
            let updated = ledger
                .patch_raw(kind, &id, &parse_body(&json)?)?
                .ok_or_else(|| LedgerError::not_found(kind.label(), &id))?;
            print_json(&updated)?;
        }
        RecordCommands::Delete { kind, id } => {
            if !ledger.delete_raw(kind, &id) {
                return Err(LedgerError::not_found(kind.label(), &id));
            }
            println!("Deleted {} {}", kind.label().to_lowercase(), id);
        }
        RecordCommands::Show { kind, id } => {
            let record = ledger
                .snapshot()
                .get_raw(kind, &id)?
                .ok_or_else(|| LedgerError::not_found(kind.label(), &id))?;
            print_json(&record)?;
        }
        RecordCommands::List { kind } => {
            print_json(&Value::Array(ledger.snapshot().list_raw(kind)?))?;
        }
    }

    Ok(())
}
