//! Warehouse connection configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the warehouse client.
///
/// Token acquisition is out of scope: the client reads a ready bearer token
/// from the environment variable named by `token_env`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Cloud project id billed for queries.
    pub project: Option<String>,
    /// REST endpoint base. Default: the public BigQuery v2 endpoint.
    pub endpoint: Option<String>,
    /// Job location (e.g. "EU"). Omitted from requests when unset.
    pub location: Option<String>,
    /// Environment variable holding the bearer token. Default: LIFT_BQ_TOKEN.
    pub token_env: Option<String>,
}

impl WarehouseConfig {
    /// Returns the effective endpoint, defaulting to the public BigQuery API.
    pub fn effective_endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or(constants::DEFAULT_BIGQUERY_ENDPOINT)
    }

    /// Returns the effective token env var name, defaulting to LIFT_BQ_TOKEN.
    pub fn effective_token_env(&self) -> &str {
        self.token_env
            .as_deref()
            .unwrap_or(constants::DEFAULT_TOKEN_ENV)
    }
}
