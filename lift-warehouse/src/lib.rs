//! Thin HTTP wrapper over the BigQuery REST API.
//!
//! Rendered SQL goes in, a result table comes out. This is deliberately
//! not a client SDK: no OAuth flows, no job management, no pagination.
//! The bearer token is read from the environment; acquiring it is the
//! caller's problem.

pub mod bigquery;
pub mod client;

pub use bigquery::BigQueryClient;
pub use client::{DryRun, QueryClient, ResultTable};
