//! BigQuery `jobs.query` client.

use async_trait::async_trait;
use lift_core::config::WarehouseConfig;
use lift_core::errors::WarehouseError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::{DryRun, QueryClient, ResultTable};

/// `jobs.query` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    query: &'a str,
    use_legacy_sql: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dry_run: Option<bool>,
}

/// `jobs.query` response body, reduced to the fields we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    #[serde(default)]
    schema: Option<TableSchema>,
    #[serde(default)]
    rows: Vec<TableRow>,
    #[serde(default)]
    total_bytes_processed: Option<String>,
    #[serde(default)]
    job_complete: Option<bool>,
    #[serde(default)]
    errors: Vec<ErrorProto>,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    #[serde(default)]
    fields: Vec<TableField>,
}

#[derive(Debug, Deserialize)]
struct TableField {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(default)]
    f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
struct TableCell {
    #[serde(default)]
    v: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ErrorProto {
    #[serde(default)]
    reason: String,
    #[serde(default)]
    message: String,
}

/// Thin client for the BigQuery v2 REST API.
#[derive(Debug)]
pub struct BigQueryClient {
    project: String,
    endpoint: String,
    location: Option<String>,
    token: String,
    client: reqwest::Client,
}

impl BigQueryClient {
    pub fn new(project: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            endpoint: lift_core::constants::DEFAULT_BIGQUERY_ENDPOINT.to_string(),
            location: None,
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from config, reading the bearer token from the
    /// configured environment variable.
    pub fn from_config(config: &WarehouseConfig) -> Result<Self, WarehouseError> {
        let project = config
            .project
            .clone()
            .ok_or_else(|| WarehouseError::Misconfigured {
                message: "warehouse.project is not set".into(),
            })?;
        let var = config.effective_token_env();
        let token = std::env::var(var).map_err(|_| WarehouseError::MissingToken {
            var: var.to_string(),
        })?;

        Ok(Self {
            project,
            endpoint: config.effective_endpoint().to_string(),
            location: config.location.clone(),
            token,
            client: reqwest::Client::new(),
        })
    }

    async fn post_query(&self, sql: &str, dry_run: bool) -> Result<QueryResponse, WarehouseError> {
        let url = format!("{}/projects/{}/queries", self.endpoint, self.project);
        let request = QueryRequest {
            query: sql,
            use_legacy_sql: false,
            location: self.location.as_deref(),
            dry_run: dry_run.then_some(true),
        };
        debug!(project = %self.project, dry_run, "submitting query");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|err| WarehouseError::Transport {
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WarehouseError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: QueryResponse =
            response
                .json()
                .await
                .map_err(|err| WarehouseError::Decode {
                    message: err.to_string(),
                })?;

        if let Some(error) = decoded.errors.first() {
            return Err(WarehouseError::JobFailed {
                reason: error.reason.clone(),
                message: error.message.clone(),
            });
        }
        if decoded.job_complete == Some(false) {
            return Err(WarehouseError::JobFailed {
                reason: "incomplete".into(),
                message: "query did not complete within the request deadline".into(),
            });
        }

        Ok(decoded)
    }
}

#[async_trait]
impl QueryClient for BigQueryClient {
    async fn run(&self, sql: &str) -> Result<ResultTable, WarehouseError> {
        let response = self.post_query(sql, false).await?;
        let table = decode_table(response)?;
        info!(
            rows = table.len(),
            columns = table.columns.len(),
            "query complete"
        );
        Ok(table)
    }

    async fn dry_run(&self, sql: &str) -> Result<DryRun, WarehouseError> {
        let response = self.post_query(sql, true).await?;
        decode_dry_run(response)
    }
}

/// Decode schema + rows into a [`ResultTable`].
fn decode_table(response: QueryResponse) -> Result<ResultTable, WarehouseError> {
    let schema = response.schema.ok_or_else(|| WarehouseError::Decode {
        message: "response has no schema".into(),
    })?;
    let columns: Vec<String> = schema.fields.into_iter().map(|f| f.name).collect();

    let mut rows = Vec::with_capacity(response.rows.len());
    for row in response.rows {
        if row.f.len() != columns.len() {
            return Err(WarehouseError::Decode {
                message: format!(
                    "row has {} cells, schema has {} columns",
                    row.f.len(),
                    columns.len()
                ),
            });
        }
        rows.push(row.f.into_iter().map(|cell| cell.v).collect());
    }

    Ok(ResultTable { columns, rows })
}

fn decode_dry_run(response: QueryResponse) -> Result<DryRun, WarehouseError> {
    let raw = response
        .total_bytes_processed
        .ok_or_else(|| WarehouseError::Decode {
            message: "dry run response has no totalBytesProcessed".into(),
        })?;
    let total_bytes_processed = raw.parse::<u64>().map_err(|_| WarehouseError::Decode {
        message: format!("totalBytesProcessed is not a number: {raw}"),
    })?;
    Ok(DryRun {
        total_bytes_processed,
    })
}
