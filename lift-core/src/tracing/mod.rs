//! Tracing setup for lift.

pub mod setup;

pub use setup::init_tracing;
