//! Paper Galgame — engine error types.

use papergal_core::error::{DomainError, LoadError};
use thiserror::Error;

/// Errors surfaced to the host.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required setting is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The content document could not be loaded. Nothing can be played.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A gameplay action was rejected.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EngineError {
    /// Whether the host can carry on after this error.
    ///
    /// Load and configuration failures halt the session; domain errors only
    /// reject the action that raised them.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
