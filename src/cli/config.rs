//! Configuration file handling
//!
//! A small JSON file supplying the defaults the flags would otherwise
//! carry: the catalog contact string and an optional default protocol.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};

/// CLI configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog contact string, e.g.
    /// `trivialcatalog_file:/etc/site/storage.xml?protocol=srm`
    pub catalog: String,

    /// Protocol used when a command does not pass `--protocol`
    #[serde(default)]
    pub default_protocol: Option<String>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.catalog.trim().is_empty() {
            return Err(CliError::config_error("catalog must not be empty"));
        }
        if let Some(protocol) = &self.default_protocol {
            if protocol.trim().is_empty() {
                return Err(CliError::config_error(
                    "default_protocol must not be empty when set",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fedcat.json");
        fs::write(
            &path,
            r#"{"catalog": "trivialcatalog_file:/a/b?protocol=srm", "default_protocol": "srm"}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.catalog, "trivialcatalog_file:/a/b?protocol=srm");
        assert_eq!(config.default_protocol.as_deref(), Some("srm"));
    }

    #[test]
    fn test_default_protocol_optional() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fedcat.json");
        fs::write(&path, r#"{"catalog": "trivialcatalog_file:/a/b"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.default_protocol.is_none());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fedcat.json");
        fs::write(&path, r#"{"catalog": ""}"#).unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fedcat.json");
        fs::write(&path, "{").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
