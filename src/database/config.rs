//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for database connections.
///
/// This struct contains all parameters needed to open and configure
/// a database connection, including the database file path, timeout
/// settings, and access modes.
///
/// # Examples
///
/// ```
/// use facilis::database::DatabaseConfig;
/// use std::time::Duration;
///
/// // Create a configuration with default settings
/// let config = DatabaseConfig::new("/tmp/facilis.db");
///
/// // Customize the configuration
/// let config = DatabaseConfig::new("/tmp/facilis.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    ///
    /// # Examples
    ///
    /// ```
    /// use facilis::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/facilis.db");
    /// assert_eq!(config.path.to_str().unwrap(), "/tmp/facilis.db");
    /// ```
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    ///
    /// The busy timeout determines how long the database connection will
    /// wait when encountering a locked database before returning an error.
    /// Under concurrent booking load this is the window a losing writer
    /// waits for the winner's transaction to commit.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    /// Useful for reporting against a store another process writes to.
    ///
    /// # Examples
    ///
    /// ```
    /// use facilis::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/facilis.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory for facilis.
///
/// The default directory is `~/.facilis`, with the home directory
/// resolved in a platform-aware way.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use facilis::database::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// println!("Data directory: {}", data_dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".facilis"))
        .ok_or_else(|| Error::InvalidInput {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the database path using environment variables or defaults.
///
/// The resolution order is:
/// 1. `$FACILIS_DATA_DIR/facilis.db` if the `FACILIS_DATA_DIR` environment
///    variable is set
/// 2. `~/.facilis/facilis.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `FACILIS_DATA_DIR` is not set.
///
/// # Examples
///
/// ```no_run
/// use facilis::database::resolve_database_path;
///
/// let db_path = resolve_database_path().unwrap();
/// println!("Database path: {}", db_path.display());
/// ```
pub fn resolve_database_path() -> Result<PathBuf> {
    if let Ok(data_dir) = std::env::var("FACILIS_DATA_DIR") {
        Ok(PathBuf::from(data_dir).join("facilis.db"))
    } else {
        Ok(default_data_dir()?.join("facilis.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_new() {
        let config = DatabaseConfig::new("/tmp/test.db");
        assert_eq!(config.path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert!(config.auto_create);
        assert!(!config.read_only);
    }

    #[test]
    fn test_config_with_busy_timeout() {
        let config =
            DatabaseConfig::new("/tmp/test.db").with_busy_timeout(Duration::from_millis(10000));
        assert_eq!(config.busy_timeout, Duration::from_millis(10000));
    }

    #[test]
    fn test_config_read_only() {
        let config = DatabaseConfig::new("/tmp/test.db").read_only();
        assert!(config.read_only);
        assert!(!config.auto_create);
    }

    #[test]
    fn test_default_data_dir() {
        // This test requires a resolvable home directory
        if let Ok(dir) = default_data_dir() {
            assert!(dir.ends_with(".facilis"));
        }
    }

    #[test]
    #[serial]
    fn test_resolve_database_path() {
        // Test with default (no FACILIS_DATA_DIR set)
        std::env::remove_var("FACILIS_DATA_DIR");
        if let Ok(path) = resolve_database_path() {
            assert!(path.ends_with("facilis.db"));
        }

        // Test with FACILIS_DATA_DIR set
        std::env::set_var("FACILIS_DATA_DIR", "/custom/data");
        let path = resolve_database_path().unwrap();
        assert_eq!(path, PathBuf::from("/custom/data/facilis.db"));

        // Clean up
        std::env::remove_var("FACILIS_DATA_DIR");
    }
}
