//! Top-level error aggregating every subsystem.

use super::error_code::LiftErrorCode;
use super::{
    ConfigError, DesignError, QueryError, SelectionError, SeriesError, StudyError, WarehouseError,
};

/// Top-level lift error. Library crates return their subsystem error; this
/// aggregate exists for callers (the CLI) that cross subsystem boundaries.
#[derive(Debug, thiserror::Error)]
pub enum LiftError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Study(#[from] StudyError),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Design(#[from] DesignError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LiftErrorCode for LiftError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Query(e) => e.error_code(),
            Self::Study(e) => e.error_code(),
            Self::Warehouse(e) => e.error_code(),
            Self::Series(e) => e.error_code(),
            Self::Design(e) => e.error_code(),
            Self::Selection(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
