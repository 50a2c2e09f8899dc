//! Configuration management for student-records.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "student-records";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "records.db";

/// Key the record snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "students";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `STUDREC_`, sections split on `__`)
/// 2. TOML config file at `~/.config/student-records/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/student-records/records.db`
    pub database_path: Option<PathBuf>,
    /// Key under which the whole record list is written.
    pub storage_key: String,
}

/// Display-related configuration.
///
/// Heights are abstract units; the list becomes scrollable once
/// `rows * row_height` exceeds `viewport_height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Height of the visible list container.
    pub viewport_height: u32,
    /// Height of a single rendered row.
    pub row_height: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            viewport_height: 400,
            row_height: 40,
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML layer from
    /// `config_path` or the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("STUDREC_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.storage_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage_key must not be empty".to_string(),
            });
        }

        if self.display.row_height == 0 {
            return Err(Error::ConfigValidation {
                message: "row_height must be greater than 0".to_string(),
            });
        }

        if self.display.viewport_height == 0 {
            return Err(Error::ConfigValidation {
                message: "viewport_height must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the key the record snapshot is stored under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage.storage_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.storage_key, "students");
        assert_eq!(config.display.viewport_height, 400);
        assert_eq!(config.display.row_height, 40);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_blank_storage_key() {
        let mut config = Config::default();
        config.storage.storage_key = "   ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("storage_key"));
    }

    #[test]
    fn test_validate_zero_row_height() {
        let mut config = Config::default();
        config.display.row_height = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("row_height"));
    }

    #[test]
    fn test_validate_zero_viewport_height() {
        let mut config = Config::default();
        config.display.viewport_height = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("viewport_height"));
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("records.db"));
        assert!(path.to_string_lossy().contains("student-records"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("student-records"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "student_records_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[storage]\nstorage_key = \"roster\"\n\n[display]\nrow_height = 20\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.storage_key(), "roster");
        assert_eq!(config.display.row_height, 20);
        assert_eq!(config.display.viewport_height, 400);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let path = std::env::temp_dir().join(format!(
            "student_records_bad_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[display]\nrow_height = 0\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_reads_storage_section() {
        let path = std::env::temp_dir().join(format!(
            "student_records_storage_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[storage]\ndatabase_path = \"/tmp/roster.db\"\n\n[display]\nviewport_height = 80\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/roster.db"));
        assert_eq!(config.storage_key(), DEFAULT_STORAGE_KEY);
        assert_eq!(config.display.viewport_height, 80);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_display_config_deserialize_partial() {
        let json = r#"{"viewport_height": 120}"#;
        let display: DisplayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(display.viewport_height, 120);
        assert_eq!(display.row_height, 40);
    }
}
