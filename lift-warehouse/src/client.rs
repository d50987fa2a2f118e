//! The warehouse client seam and result types.

use async_trait::async_trait;
use lift_core::errors::WarehouseError;
use serde::{Deserialize, Serialize};

/// A decoded query result: column names plus row-major values.
///
/// Values keep the wire representation (BigQuery serializes scalars as
/// JSON strings); interpreting them is up to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Outcome of a dry run: the query validated, nothing executed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DryRun {
    /// Bytes the query would process.
    pub total_bytes_processed: u64,
}

/// Seam between rendered SQL and the warehouse. Production code talks to
/// [`crate::BigQueryClient`]; tests substitute an in-memory fake.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Execute `sql` and decode the result table.
    async fn run(&self, sql: &str) -> Result<ResultTable, WarehouseError>;

    /// Validate `sql` without executing it.
    async fn dry_run(&self, sql: &str) -> Result<DryRun, WarehouseError>;
}
