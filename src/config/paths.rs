//! Path management for bizledger
//!
//! ## Path Resolution Order
//!
//! 1. `BIZLEDGER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/bizledger` on Linux,
//!    `~/Library/Application Support/bizledger` on macOS, `%APPDATA%` on
//!    Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{LedgerError, LedgerResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BIZLEDGER_DATA_DIR";

/// Manages all paths used by bizledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment or the platform
    pub fn new() -> LedgerResult<Self> {
        Self::resolve(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    /// Resolve with an explicit override taking precedence
    pub fn resolve(override_dir: Option<PathBuf>) -> LedgerResult<Self> {
        let base_dir = match override_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => ProjectDirs::from("", "", "bizledger")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    LedgerError::Config(format!(
                        "Could not determine a config directory; set {}",
                        DATA_DIR_ENV
                    ))
                })?,
        };
        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the ledger snapshot
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// The persisted ledger snapshot
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
