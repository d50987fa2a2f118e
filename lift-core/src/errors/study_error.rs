//! Study folder convention errors.

use std::path::PathBuf;

use super::error_code::{self, LiftErrorCode};

/// Errors from scaffolding and opening `studies/<name>` folders.
#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    #[error("Study already exists: {name} at {path}")]
    AlreadyExists { name: String, path: PathBuf },

    #[error("Study not found: {name} (expected {path})")]
    NotFound { name: String, path: PathBuf },

    #[error("Invalid study name: {name} ({message})")]
    InvalidName { name: String, message: String },

    #[error("Invalid study manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LiftErrorCode for StudyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => error_code::STUDY_EXISTS,
            Self::NotFound { .. } => error_code::STUDY_NOT_FOUND,
            _ => error_code::STUDY_ERROR,
        }
    }
}
