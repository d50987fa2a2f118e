//! Query discovery configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

/// Configuration for the template discovery subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueriesConfig {
    /// Template file extension. Default: "sql".
    pub extension: Option<String>,
    /// Maximum directory depth relative to the queries folder. Default: 3.
    pub max_depth: Option<usize>,
    /// Record unreadable files instead of aborting discovery. Default: false.
    pub continue_on_error: Option<bool>,
}

impl QueriesConfig {
    /// Returns the effective extension, defaulting to "sql".
    pub fn effective_extension(&self) -> &str {
        self.extension
            .as_deref()
            .unwrap_or(constants::DEFAULT_TEMPLATE_EXTENSION)
    }

    /// Returns the effective maximum depth, defaulting to 3.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(constants::DEFAULT_MAX_DEPTH)
    }

    /// Returns the effective continue-on-error flag, defaulting to false.
    pub fn effective_continue_on_error(&self) -> bool {
        self.continue_on_error.unwrap_or(false)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ext) = &self.extension {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::InvalidValue {
                    field: "queries.extension".into(),
                    message: "extension must be non-empty and without a leading dot".into(),
                });
            }
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "queries.max_depth".into(),
                message: "max_depth must be >= 1".into(),
            });
        }
        Ok(())
    }
}
