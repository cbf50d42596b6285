//! Configuration for tkt
//!
//! Stored in tkt.toml. The store itself takes an explicit file path at
//! construction; the config just tells the CLI which path to use.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// tkt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the ticket database file
    pub database: PathBuf,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("tickets.json"),
            display: DisplayConfig::default(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { colors: true }
    }
}

impl Config {
    /// Load config from a TOML file, falling back to defaults when the
    /// file does not exist
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Other(format!("Invalid config: {}", e)))?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Other(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("tkt.toml")).unwrap();
        assert_eq!(config.database, PathBuf::from("tickets.json"));
        assert!(config.display.colors);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tkt.toml");

        let mut config = Config::default();
        config.database = PathBuf::from("data/chamados.json");
        config.display.colors = false;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.database, config.database);
        assert!(!loaded.display.colors);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tkt.toml");
        std::fs::write(&path, "database = [not toml").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
