//! Logging and observability
//!
//! Structured logging setup using tracing. The crate itself only emits
//! `tracing` events; this helper wires a subscriber for binaries and tests
//! that don't bring their own.
//!
//! # Example
//!
//! ```no_run
//! use polystore::logging::init_logging;
//!
//! init_logging("info").expect("Failed to initialize logging");
//! tracing::info!("datastore layer ready");
//! ```

use crate::domain::{PolystoreError, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system
///
/// Sets up a fmt subscriber with an environment filter. `RUST_LOG` wins over
/// the supplied level when set.
///
/// # Errors
///
/// Returns an error for an unknown level or when a global subscriber is
/// already installed.
pub fn init_logging(log_level: &str) -> Result<()> {
    let level = parse_log_level(log_level)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("polystore={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| PolystoreError::Configuration(format!("Failed to set subscriber: {e}")))?;

    Ok(())
}

/// Parse a log level from a string
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(PolystoreError::Configuration(format!(
            "Invalid log level '{other}'. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
