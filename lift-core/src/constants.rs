//! Shared constants for the lift study toolkit.

/// Lift version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default template file extension.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "sql";

/// Default maximum directory depth for template discovery.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Directory holding study folders, relative to the project root.
pub const STUDIES_DIR: &str = "studies";

/// Per-study directory holding query templates.
pub const QUERIES_DIR: &str = "queries";

/// Per-study directory holding exported data.
pub const DATA_DIR: &str = "data";

/// Per-study directory holding notebooks.
pub const NOTEBOOKS_DIR: &str = "notebooks";

/// Study manifest file name.
pub const STUDY_MANIFEST: &str = "study.yml";

/// Project config file name.
pub const CONFIG_FILE: &str = "lift.toml";

/// Default significance level for test design.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default cap on enumerated region combinations.
pub const DEFAULT_MAX_COMBINATIONS: usize = 10_000;

/// Default cap on candidate group size.
pub const DEFAULT_MAX_GROUP_SIZE: usize = 4;

/// Default scan progress logging interval (combinations).
pub const DEFAULT_LOG_EVERY: usize = 100;

/// Default BigQuery REST endpoint.
pub const DEFAULT_BIGQUERY_ENDPOINT: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Default environment variable holding the warehouse bearer token.
pub const DEFAULT_TOKEN_ENV: &str = "LIFT_BQ_TOKEN";
