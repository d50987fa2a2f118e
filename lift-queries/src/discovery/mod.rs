//! Template file discovery.
//! Walks a directory tree collecting files with the configured extension.

pub mod types;
pub mod walker;

pub use types::{DiscoveredTemplate, Discovery, DiscoveryOptions, DiscoveryStats};
pub use walker::discover;
