//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the lift tracing/logging system.
///
/// Reads the `LIFT_LOG` environment variable for per-subsystem log levels.
/// Format: `LIFT_LOG=lift_queries=debug,lift_warehouse=info`
///
/// Falls back to `lift=info` if `LIFT_LOG` is not set or is invalid.
///
/// This function is idempotent; calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("LIFT_LOG").unwrap_or_else(|_| EnvFilter::new("lift=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
