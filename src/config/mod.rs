//! Hierarchical configuration for facilis.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`FACILIS_*`)
//! 3. Project config (`facilis.yaml`, discovered walking up from the
//!    working directory)
//! 4. User config (`~/.facilis/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Fully programmatic configuration, ignoring files and environment:
//!
//! ```
//! use std::path::PathBuf;
//! use facilis::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         data_dir: Some(PathBuf::from("/srv/facilis")),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.data_dir, Some(PathBuf::from("/srv/facilis")));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{ConfigLoader, ConfigSource};
pub use schema::Config;

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Reads configuration overrides from `FACILIS_*` environment variables.
///
/// Recognized variables:
/// - `FACILIS_DATA_DIR`: directory for the database and user config;
/// - `FACILIS_BUSY_TIMEOUT_MS`: database busy timeout in milliseconds;
/// - `FACILIS_LOG_MODE`: log verbosity.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `FACILIS_BUSY_TIMEOUT_MS` is set
/// but not a non-negative integer.
pub fn environment_config() -> Result<Config> {
    let mut config = Config::default();

    if let Ok(dir) = env::var("FACILIS_DATA_DIR") {
        config.data_dir = Some(PathBuf::from(dir));
    }

    if let Ok(raw) = env::var("FACILIS_BUSY_TIMEOUT_MS") {
        let ms = raw.parse::<u64>().map_err(|e| Error::InvalidInput {
            field: "FACILIS_BUSY_TIMEOUT_MS".to_string(),
            message: format!("expected milliseconds, got '{raw}': {e}"),
        })?;
        config.busy_timeout_ms = Some(ms);
    }

    if let Ok(mode) = env::var("FACILIS_LOG_MODE") {
        config.log_mode = Some(mode);
    }

    Ok(config)
}

/// Assembles a merged [`Config`] from files, environment, and overrides.
///
/// # Examples
///
/// ```no_run
/// use facilis::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new().build().unwrap();
/// let db_config = config.database_config().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory project config discovery starts from.
    ///
    /// Defaults to the process working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Applies programmatic overrides on top of all other sources.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Skips file sources (user and project config).
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips `FACILIS_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Builds the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or
    /// an environment override is malformed.
    pub fn build(self) -> Result<Config> {
        let mut merged = Config::default();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            for source in ConfigLoader::load_all(&working_dir, None)? {
                merged.merge_from(source.config);
            }
        }

        if !self.skip_env {
            merged.merge_from(environment_config()?);
        }

        if let Some(overrides) = self.overrides {
            merged.merge_from(overrides);
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var("FACILIS_DATA_DIR");
        env::remove_var("FACILIS_BUSY_TIMEOUT_MS");
        env::remove_var("FACILIS_LOG_MODE");
    }

    #[test]
    #[serial]
    fn environment_config_reads_variables() {
        clear_env();
        env::set_var("FACILIS_DATA_DIR", "/env/data");
        env::set_var("FACILIS_BUSY_TIMEOUT_MS", "1234");
        env::set_var("FACILIS_LOG_MODE", "verbose");

        let config = environment_config().unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/env/data")));
        assert_eq!(config.busy_timeout_ms, Some(1234));
        assert_eq!(config.log_mode, Some("verbose".to_string()));

        clear_env();
    }

    #[test]
    #[serial]
    fn malformed_timeout_rejected() {
        clear_env();
        env::set_var("FACILIS_BUSY_TIMEOUT_MS", "soon");

        let err = environment_config().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput { ref field, .. } if field == "FACILIS_BUSY_TIMEOUT_MS"
        ));

        clear_env();
    }

    #[test]
    #[serial]
    fn builder_skip_everything_yields_defaults() {
        clear_env();
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn overrides_beat_files_and_env() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("facilis.yaml"),
            "busy_timeout_ms: 100\nlog_mode: quiet\n",
        )
        .unwrap();
        env::set_var("FACILIS_BUSY_TIMEOUT_MS", "200");

        let config = ConfigBuilder::new()
            .with_working_dir(temp_dir.path())
            .with_config(Config {
                busy_timeout_ms: Some(300),
                ..Default::default()
            })
            .build()
            .unwrap();

        // Override wins the contested field; file fills the rest
        assert_eq!(config.busy_timeout_ms, Some(300));
        assert_eq!(config.log_mode, Some("quiet".to_string()));

        clear_env();
    }

    #[test]
    #[serial]
    fn env_beats_project_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("facilis.yaml"), "busy_timeout_ms: 100\n").unwrap();
        env::set_var("FACILIS_BUSY_TIMEOUT_MS", "200");

        let config = ConfigBuilder::new()
            .with_working_dir(temp_dir.path())
            .build()
            .unwrap();
        assert_eq!(config.busy_timeout_ms, Some(200));

        clear_env();
    }
}
