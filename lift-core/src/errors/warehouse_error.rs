//! Warehouse client errors.

use super::error_code::{self, LiftErrorCode};

/// Errors from submitting rendered SQL to the data warehouse.
/// Transport failures are carried as messages so `lift-core` stays free of
/// the HTTP stack; the warehouse crate maps `reqwest::Error` at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    #[error("Warehouse token not set (expected env var {var})")]
    MissingToken { var: String },

    #[error("Warehouse misconfigured: {message}")]
    Misconfigured { message: String },

    #[error("Warehouse request failed: {message}")]
    Transport { message: String },

    #[error("Warehouse returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Query job failed ({reason}): {message}")]
    JobFailed { reason: String, message: String },

    #[error("Could not decode warehouse response: {message}")]
    Decode { message: String },
}

impl LiftErrorCode for WarehouseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => error_code::WAREHOUSE_AUTH,
            Self::JobFailed { .. } => error_code::JOB_FAILED,
            _ => error_code::WAREHOUSE_ERROR,
        }
    }
}
