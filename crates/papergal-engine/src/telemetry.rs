//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Builds the log filter from `RUST_LOG`, or from `default_filter` when
/// `RUST_LOG` is unset or invalid.
#[must_use]
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs a JSON `tracing` subscriber as the global default.
///
/// # Errors
///
/// Returns `EngineError::Config` if a global subscriber is already set.
pub fn init_tracing(default_filter: &str) -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .json()
        .try_init()
        .map_err(|e| EngineError::Config(format!("failed to install tracing subscriber: {e}")))
}
