//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::{default_data_dir, DatabaseConfig};
use crate::error::{Error, Result};
use crate::logging::LogLevel;

/// Complete configuration structure.
///
/// Every field is optional; unset fields fall back to built-in
/// defaults when the config is put to use. Unknown keys in a config
/// file are rejected rather than silently ignored.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use facilis::config::Config;
///
/// let config = Config {
///     data_dir: Some(PathBuf::from("/var/lib/facilis")),
///     ..Default::default()
/// };
/// assert!(config.busy_timeout_ms.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database file and user config.
    pub data_dir: Option<PathBuf>,

    /// Busy timeout for database lock contention, in milliseconds.
    pub busy_timeout_ms: Option<u64>,

    /// Log verbosity: "quiet", "normal", or "verbose".
    pub log_mode: Option<String>,
}

impl Config {
    /// Overlays `other` onto this config; set fields in `other` win.
    pub fn merge_from(&mut self, other: Config) {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.busy_timeout_ms.is_some() {
            self.busy_timeout_ms = other.busy_timeout_ms;
        }
        if other.log_mode.is_some() {
            self.log_mode = other.log_mode;
        }
    }

    /// Resolves the database configuration this config describes.
    ///
    /// The database lives at `{data_dir}/facilis.db`, defaulting to
    /// `~/.facilis` when no data directory is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is configured and the home
    /// directory cannot be determined.
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        let mut config = DatabaseConfig::new(data_dir.join("facilis.db"));
        if let Some(ms) = self.busy_timeout_ms {
            config = config.with_busy_timeout(Duration::from_millis(ms));
        }
        Ok(config)
    }

    /// Parses the configured log mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `log_mode` names no level.
    pub fn log_level(&self) -> Result<LogLevel> {
        match &self.log_mode {
            None => Ok(LogLevel::Normal),
            Some(mode) => LogLevel::parse(mode).map_err(|message| Error::InvalidInput {
                field: "log_mode".to_string(),
                message,
            }),
        }
    }
}
