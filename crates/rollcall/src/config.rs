//! Configuration management for rollcall.
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
const DATA_DIR_NAME: &str = "rollcall";

/// Default ledger file name.
const LEDGER_FILE_NAME: &str = "user_data.txt";

/// Default audit log file name.
const AUDIT_FILE_NAME: &str = "app_logs.txt";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "feedback.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROLLCALL_`)
/// 2. TOML config file at `~/.config/rollcall/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registration ledger configuration.
    pub ledger: LedgerConfig,
    /// Audit log configuration.
    pub audit: AuditConfig,
    /// Feedback store configuration.
    pub storage: StorageConfig,
}

/// Registration ledger configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Path to the ledger file.
    /// Defaults to `~/.local/share/rollcall/user_data.txt`
    pub path: Option<PathBuf>,
}

/// Audit log configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Write audit lines at all.
    pub enabled: bool,
    /// Path to the audit log.
    /// Defaults to `~/.local/share/rollcall/app_logs.txt`
    pub path: Option<PathBuf>,
}

/// Feedback store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/rollcall/feedback.db`
    pub database_path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ROLLCALL_").split("__"));

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
    /// Returns an error if an explicitly configured path is empty.
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("ledger.path", &self.ledger.path),
            ("audit.path", &self.audit.path),
            ("storage.database_path", &self.storage.database_path),
        ];

        for (name, path) in paths {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must not be empty"),
                });
            }
        }

        if self.ledger_path() == self.database_path() {
            return Err(Error::ConfigValidation {
                message: "ledger.path and storage.database_path must differ".to_string(),
            });
        }

        Ok(())
    }

    /// Get the ledger path, resolving defaults if not set.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(LEDGER_FILE_NAME))
    }

    /// Get the audit log path, resolving defaults if not set.
    #[must_use]
    pub fn audit_path(&self) -> PathBuf {
        self.audit
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(AUDIT_FILE_NAME))
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ledger.path.is_none());
        assert!(config.audit.enabled);
        assert!(config.audit.path.is_none());
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_path() {
        let mut config = Config::default();
        config.audit.path = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("audit.path"));
    }

    #[test]
    fn test_validate_ledger_and_database_collide() {
        let mut config = Config::default();
        config.ledger.path = Some(PathBuf::from("/tmp/same"));
        config.storage.database_path = Some(PathBuf::from("/tmp/same"));

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must differ"));
    }

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert!(config.ledger_path().ends_with("rollcall/user_data.txt"));
        assert!(config.audit_path().ends_with("rollcall/app_logs.txt"));
        assert!(config.database_path().ends_with("rollcall/feedback.db"));
    }

    #[test]
    fn test_custom_paths() {
        let mut config = Config::default();
        config.ledger.path = Some(PathBuf::from("/data/users.txt"));
        config.storage.database_path = Some(PathBuf::from("/data/fb.sqlite"));

        assert_eq!(config.ledger_path(), PathBuf::from("/data/users.txt"));
        assert_eq!(config.database_path(), PathBuf::from("/data/fb.sqlite"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.ends_with("rollcall/config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("rollcall_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("config.toml");
        std::fs::write(
            &file,
            "[ledger]\npath = \"/srv/rollcall/users.txt\"\n\n[audit]\nenabled = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(file)).unwrap();
        assert_eq!(config.ledger_path(), PathBuf::from("/srv/rollcall/users.txt"));
        assert!(!config.audit.enabled);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("database_path"));
        assert!(json.contains("enabled"));
    }
}
