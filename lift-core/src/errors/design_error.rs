//! Test-design errors.

use super::error_code::{self, LiftErrorCode};

/// Errors from test-design summary computation.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("alpha must be in (0, 1), got {value}")]
    InvalidAlpha { value: f64 },

    #[error("power must be in (0, 1), got {value}")]
    InvalidPower { value: f64 },

    #[error("n_obs must be >= 2, got {value}")]
    InvalidObservations { value: usize },

    #[error("Exactly one of power and mde_percent must be set")]
    AmbiguousTarget,

    #[error("Standard deviation must be positive, got {value}")]
    NonPositiveStd { value: f64 },

    #[error("Mean must be positive for relative effects, got {value}")]
    NonPositiveMean { value: f64 },
}

impl LiftErrorCode for DesignError {
    fn error_code(&self) -> &'static str {
        error_code::DESIGN_ERROR
    }
}
