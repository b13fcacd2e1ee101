//! Configuration file discovery and loading.
//!
//! Two file sources feed the merged configuration: the user config at
//! `~/.facilis/config.yaml` and a project `facilis.yaml` discovered by
//! walking up from the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::database::default_data_dir;
use crate::error::Result;

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path the configuration was loaded from.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from the file sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discovers and loads all configuration files.
    ///
    /// Searches for:
    /// 1. the user config at `~/.facilis/config.yaml` (precedence 1);
    /// 2. a project `facilis.yaml` walking up from `working_dir`
    ///    (precedence 2).
    ///
    /// `data_dir` overrides where the user config is loaded from.
    /// Returned sources are sorted by ascending precedence so they can
    /// be merged in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        if let Some(project_config) = Self::discover_project_config(working_dir)? {
            sources.push(project_config);
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join("config.yaml"),
            None => default_data_dir()?.join("config.yaml"),
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Walks up from `start_dir` looking for a `facilis.yaml`.
    ///
    /// Stops at the first directory containing one, so a nested project
    /// shadows its ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover_project_config(start_dir: &Path) -> Result<Option<ConfigSource>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let candidate = current.join("facilis.yaml");
            if candidate.exists() {
                let config = Self::load_file(&candidate)?;
                return Ok(Some(ConfigSource {
                    path: candidate,
                    precedence: 2,
                    config,
                }));
            }
            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Loads and parses one YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is
    /// invalid (including unknown keys).
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn load_nonexistent_file_fails() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_invalid_yaml_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "data_dir: [unterminated\n").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "busy_timeout_ms: 750\n").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.busy_timeout_ms, Some(750));
    }

    #[test]
    fn discover_finds_nothing_in_empty_tree() {
        let temp_dir = TempDir::new().unwrap();
        let found = ConfigLoader::discover_project_config(temp_dir.path()).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn discover_walks_up_to_parent() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("nested").join("deeper");
        fs::create_dir_all(&child).unwrap();
        fs::write(
            temp_dir.path().join("facilis.yaml"),
            "data_dir: /from-parent\n",
        )
        .unwrap();

        let found = ConfigLoader::discover_project_config(&child)
            .unwrap()
            .unwrap();
        assert_eq!(found.precedence, 2);
        assert_eq!(found.config.data_dir, Some(PathBuf::from("/from-parent")));
    }

    #[test]
    fn discover_stops_at_first_config() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("child");
        fs::create_dir(&child).unwrap();
        fs::write(temp_dir.path().join("facilis.yaml"), "data_dir: /outer\n").unwrap();
        fs::write(child.join("facilis.yaml"), "data_dir: /inner\n").unwrap();

        let found = ConfigLoader::discover_project_config(&child)
            .unwrap()
            .unwrap();
        assert_eq!(found.config.data_dir, Some(PathBuf::from("/inner")));
    }

    #[test]
    fn load_all_sorts_user_before_project() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        fs::write(data_dir.join("config.yaml"), "busy_timeout_ms: 100\n").unwrap();
        fs::write(temp_dir.path().join("facilis.yaml"), "busy_timeout_ms: 200\n").unwrap();

        let sources = ConfigLoader::load_all(temp_dir.path(), Some(&data_dir)).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].precedence, 1);
        assert_eq!(sources[1].precedence, 2);
    }
}
