//! Core types, errors, config, tracing, and constants for the lift study
//! toolkit.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use errors::{LiftError, LiftErrorCode};
