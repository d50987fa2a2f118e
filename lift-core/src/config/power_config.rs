//! Power scan defaults.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

/// Default parameters for the candidate region scan. Scenario files can
/// override each of these per run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PowerConfig {
    /// Significance level. Default: 0.05.
    pub alpha: Option<f64>,
    /// Cap on enumerated combinations. Default: 10000.
    pub max_combinations: Option<usize>,
    /// Cap on candidate group size. Default: 4.
    pub max_group_size: Option<usize>,
    /// Progress logging interval in combinations. Default: 100.
    pub log_every: Option<usize>,
}

impl PowerConfig {
    /// Returns the effective significance level, defaulting to 0.05.
    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(constants::DEFAULT_ALPHA)
    }

    /// Returns the effective combination cap, defaulting to 10000.
    pub fn effective_max_combinations(&self) -> usize {
        self.max_combinations
            .unwrap_or(constants::DEFAULT_MAX_COMBINATIONS)
    }

    /// Returns the effective group size cap, defaulting to 4.
    pub fn effective_max_group_size(&self) -> usize {
        self.max_group_size
            .unwrap_or(constants::DEFAULT_MAX_GROUP_SIZE)
    }

    /// Returns the effective logging interval, defaulting to 100.
    pub fn effective_log_every(&self) -> usize {
        self.log_every.unwrap_or(constants::DEFAULT_LOG_EVERY)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(alpha) = self.alpha {
            if alpha <= 0.0 || alpha >= 1.0 {
                return Err(ConfigError::InvalidValue {
                    field: "power.alpha".into(),
                    message: format!("must be in (0, 1), got {alpha}"),
                });
            }
        }
        for (field, value) in [
            ("power.max_combinations", self.max_combinations),
            ("power.max_group_size", self.max_group_size),
            ("power.log_every", self.log_every),
        ] {
            if value == Some(0) {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    message: "must be >= 1".into(),
                });
            }
        }
        Ok(())
    }
}
