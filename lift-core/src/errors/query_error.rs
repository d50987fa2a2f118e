//! Query registry and rendering errors.

use std::path::PathBuf;

use super::error_code::{self, LiftErrorCode};

/// Errors from template discovery, registry lookup, and rendering.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Missing query: {name}")]
    MissingQuery { name: String },

    #[error("Missing parameter `{variable}` rendering query {query}")]
    MissingParameter { query: String, variable: String },

    #[error("Duplicate query name {name} from {path}")]
    DuplicateName { name: String, path: PathBuf },

    #[error("Template syntax error in {query}: {message}")]
    TemplateSyntax { query: String, message: String },

    #[error("Render failed for {query}: {message}")]
    RenderFailed { query: String, message: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Invalid parameter file {path}: {message}")]
    InvalidParams { path: PathBuf, message: String },
}

impl LiftErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingQuery { .. } => error_code::MISSING_QUERY,
            Self::MissingParameter { .. } => error_code::MISSING_PARAMETER,
            Self::DuplicateName { .. } => error_code::DUPLICATE_QUERY,
            Self::TemplateSyntax { .. } | Self::RenderFailed { .. } => error_code::TEMPLATE_ERROR,
            Self::Io { .. } | Self::NotADirectory { .. } | Self::InvalidParams { .. } => {
                error_code::DISCOVERY_ERROR
            }
        }
    }
}
