//! Candidate region scan errors.

use super::error_code::{self, LiftErrorCode};
use super::{DesignError, SeriesError};

/// Errors from the candidate region scan.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Candidate region {region} is not a column of the panel")]
    UnknownRegion { region: String },

    #[error("No candidate regions supplied")]
    NoCandidates,

    #[error("max_group_size must be >= 1, got {value}")]
    InvalidGroupSize { value: usize },

    #[error("max_combinations must be >= 1, got {value}")]
    InvalidCombinationCap { value: usize },

    #[error("size_bounds_frac lower bound {lo} must be below upper bound {hi}")]
    InvalidSizeBounds { lo: f64, hi: f64 },

    #[error("Profile regions must match panel regions exactly ({missing} missing, {extra} extra)")]
    ProfileMismatch { missing: usize, extra: usize },

    #[error(transparent)]
    Design(#[from] DesignError),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl LiftErrorCode for SelectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Design(e) => e.error_code(),
            Self::Series(e) => e.error_code(),
            _ => error_code::SELECTION_ERROR,
        }
    }
}
