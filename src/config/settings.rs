//! User settings for bizledger
//!
//! Display preferences and the default ticker interval. Every field has a
//! default so older or hand-edited files still load.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{read_json, write_json_atomic};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Seconds between scheduler ticks for `tick --watch`
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_tick_interval() -> u64 {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            tick_interval_secs: default_tick_interval(),
        }
    }
}

/// Reject strftime strings chrono cannot render
pub fn check_date_format(format: &str) -> LedgerResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LedgerError::Config(format!(
            "Invalid date format '{}'",
            format
        )));
    }
    Ok(())
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    ///
    /// Not saved here; callers decide when to persist.
    pub fn load_or_create(paths: &LedgerPaths) -> LedgerResult<Self> {
        let settings: Settings = read_json(paths.settings_file())
            .map_err(|e| LedgerError::Config(format!("Failed to load settings: {}", e)))?;
        check_date_format(&settings.date_format)?;
        Ok(settings)
    }

    pub fn set_date_format(&mut self, format: String) -> LedgerResult<()> {
        check_date_format(&format)?;
        self.date_format = format;
        Ok(())
    }

    pub fn save(&self, paths: &LedgerPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
