//! Discovery data types: DiscoveredTemplate, Discovery, DiscoveryStats.

use std::path::PathBuf;

use lift_core::config::QueriesConfig;
use serde::{Deserialize, Serialize};

/// A single discovered template file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredTemplate {
    /// Registry name: relative path stems joined with `/`.
    pub name: String,
    pub path: PathBuf,
    /// Raw template text.
    pub source: String,
    pub file_size: u64,
    /// xxh3 hash of the template text.
    pub content_hash: u64,
}

/// The output of a discovery run over one directory tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Discovery {
    pub templates: Vec<DiscoveredTemplate>,
    /// Files that failed to load, with the reason. Only populated when
    /// `continue_on_error` is set; otherwise the first failure aborts.
    pub failed: Vec<(PathBuf, String)>,
    pub stats: DiscoveryStats,
}

/// Aggregate statistics for a discovery run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryStats {
    pub total_templates: usize,
    pub total_size_bytes: u64,
    pub discovery_ms: u64,
    pub files_skipped_extension: usize,
}

/// Options controlling a discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Extension (without dot) that qualifies a file as a template.
    pub extension: String,
    /// Directory levels below the root that are searched.
    pub max_depth: usize,
    /// Record unreadable files instead of aborting.
    pub continue_on_error: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extension: lift_core::constants::DEFAULT_TEMPLATE_EXTENSION.to_string(),
            max_depth: lift_core::constants::DEFAULT_MAX_DEPTH,
            continue_on_error: false,
        }
    }
}

impl From<&QueriesConfig> for DiscoveryOptions {
    fn from(config: &QueriesConfig) -> Self {
        Self {
            extension: config.effective_extension().to_string(),
            max_depth: config.effective_max_depth(),
            continue_on_error: config.effective_continue_on_error(),
        }
    }
}
