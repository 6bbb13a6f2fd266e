//! Process configuration for the composition root.
//!
//! # Responsibility
//! - Carry process-wide settings as an explicit value, not ambient state.
//! - Keep environment access in one constructor used only by binaries.
//!
//! # Invariants
//! - Library code never reads the process environment; tests build this
//!   struct directly with fixture values.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_DB_FILE: &str = "verdant_contacts.sqlite3";

/// Settings handed to the composition root at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Authentication domain consumed by the (out-of-scope) upload
    /// middleware stub.
    pub auth_domain: String,
    /// Contacts database file path.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file
    /// logging for this process.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            auth_domain: String::new(),
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from `VERDANT_*` environment variables.
    ///
    /// Binary-only convenience; unset variables fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_domain: std::env::var("VERDANT_AUTH_DOMAIN").unwrap_or(defaults.auth_domain),
            db_path: std::env::var("VERDANT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: std::env::var("VERDANT_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("VERDANT_LOG_DIR").ok().map(PathBuf::from),
        }
    }
}
