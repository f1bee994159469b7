//! CSV import
//!
//! Turns CSV text into raw JSON records for `Ledger::import_raw`. The header
//! row names the fields; each data row becomes one record. Rows whose column
//! count differs from the header are skipped. Cells that look like numbers
//! become JSON numbers, and dollar columns are converted to cents.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::{Map, Number, Value};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::store::EntityKind;

/// Collections that accept CSV imports
pub const IMPORTABLE_KINDS: [EntityKind; 3] = [
    EntityKind::Transactions,
    EntityKind::Customers,
    EntityKind::Vendors,
];

/// Columns holding dollar amounts
const MONEY_COLUMNS: [&str; 8] = [
    "amount",
    "balance",
    "price",
    "total",
    "subTotal",
    "tax",
    "budget",
    "totalSpent",
];

const EMPTY_CSV: &str = "CSV is empty or couldn't be parsed.";

/// Parse CSV text into one JSON object per data row
pub fn parse_csv(text: &str) -> LedgerResult<Vec<Value>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.trim().as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LedgerError::Validation(EMPTY_CSV.into()));
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != headers.len() {
            debug!(row = idx + 1, columns = record.len(), "skipping row with mismatched column count");
            continue;
        }
        rows.push(row_to_value(&headers, &record));
    }

    if rows.is_empty() {
        return Err(LedgerError::Validation(EMPTY_CSV.into()));
    }
    Ok(rows)
}

fn row_to_value(headers: &StringRecord, record: &StringRecord) -> Value {
    let mut row = Map::new();
    for (header, cell) in headers.iter().zip(record.iter()) {
        let value = match parse_number(cell) {
            Some(n) if is_money_column(header) => Value::from((n * 100.0).round() as i64),
            Some(n) => number_value(n),
            None => Value::String(cell.to_string()),
        };
        row.insert(header.to_string(), value);
    }
    Value::Object(row)
}

fn is_money_column(header: &str) -> bool {
    MONEY_COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(header))
}

fn parse_number(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Parse `text` and import it into `kind` as one all-or-nothing batch
pub fn import_csv(ledger: &mut Ledger, kind: EntityKind, text: &str) -> LedgerResult<Vec<Value>> {
    if !IMPORTABLE_KINDS.contains(&kind) {
        let allowed: Vec<_> = IMPORTABLE_KINDS.iter().map(|k| k.key()).collect();
        return Err(LedgerError::Validation(format!(
            "Cannot import {}. Importable collections: {}",
            kind,
            allowed.join(", ")
        )));
    }

    let rows = parse_csv(text)?;
    let imported = ledger.import_raw(kind, rows)?;
    info!(%kind, count = imported.len(), "imported CSV");
    Ok(imported)
}
