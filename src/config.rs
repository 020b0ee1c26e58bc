//! Configuration management for the example programs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::inventory::Inventory;
use crate::logging::EXAMPLE_LOGGER;

/// Example program configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Loggers that get a console handler at startup (default: ["ophyd_examples"])
    #[serde(default = "default_logger_names")]
    pub logger_names: Vec<String>,

    /// `tracing` filter used when RUST_LOG is unset
    #[serde(default = "default_env_filter")]
    pub env_filter: String,

    /// Channel tables handed to the examples (default: the compiled-in tables)
    #[serde(default)]
    pub inventory: Inventory,
}

fn default_logger_names() -> Vec<String> {
    vec![EXAMPLE_LOGGER.to_string()]
}

fn default_env_filter() -> String {
    format!("{}=debug,warn", EXAMPLE_LOGGER)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_names: default_logger_names(),
            env_filter: default_env_filter(),
            inventory: Inventory::builtin(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the base configuration directory (~/.ophyd-examples)
/// Falls back to ./.ophyd-examples if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".ophyd-examples")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ophyd-examples"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::MOTOR_RECS;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logger_names, ["ophyd_examples"]);
        assert_eq!(config.env_filter, "ophyd_examples=debug,warn");
        assert_eq!(config.inventory, Inventory::builtin());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_inventory_override() {
        let parsed: Config = toml::from_str(
            r#"
            logger_names = ["ophyd_examples", "ophyd"]

            [inventory]
            motor_recs = ["XF:23IDA-OP{Mir:1-Ax:Pit}Mtr"]
            "#,
        )
        .unwrap();

        assert_eq!(parsed.logger_names, ["ophyd_examples", "ophyd"]);
        assert_eq!(parsed.inventory.motor_recs, ["XF:23IDA-OP{Mir:1-Ax:Pit}Mtr"]);
        assert_eq!(parsed.inventory.fake_sensors.len(), 6);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.env_filter = "trace".to_string();
        config.inventory.motor_recs.truncate(2);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.env_filter, "trace");
        assert_eq!(loaded.inventory.motor_recs, &MOTOR_RECS[..2]);
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "logger_names = 5").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_try_config_dir() {
        if let Some(path) = try_config_dir() {
            assert!(path.ends_with(".ophyd-examples"));
        }
        assert!(config_file_path().ends_with("config.toml"));
    }
}
