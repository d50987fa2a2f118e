//! Project configuration loaded from `lift.toml`.
//! Every field is optional; `effective_*` accessors apply defaults.

pub mod power_config;
pub mod queries_config;
pub mod warehouse_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

pub use power_config::PowerConfig;
pub use queries_config::QueriesConfig;
pub use warehouse_config::WarehouseConfig;

/// Top-level configuration for a lift project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftConfig {
    pub queries: QueriesConfig,
    pub warehouse: WarehouseConfig,
    pub power: PowerConfig,
}

impl LiftConfig {
    /// Load configuration from `<root>/lift.toml`.
    ///
    /// A missing file yields the default configuration; a file that exists
    /// but does not parse or validate is an error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(constants::CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Self = toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded project config");
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.queries.validate()?;
        self.power.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LiftConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.queries.effective_extension(), "sql");
    }
}
