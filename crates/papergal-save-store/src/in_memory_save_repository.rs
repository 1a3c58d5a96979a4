//! In-memory implementation of the `SaveRepository` trait.

use std::sync::{Mutex, PoisonError};

use papergal_core::error::DomainError;
use papergal_core::save::SaveRepository;
use tracing::warn;

/// Keeps the snapshot as serialized text, the way a key-value store would.
///
/// Useful for hosts without a writable filesystem and for seeding raw,
/// possibly corrupt, saves.
#[derive(Debug, Default)]
pub struct InMemorySaveRepository {
    raw: Mutex<Option<String>>,
}

impl InMemorySaveRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `raw` verbatim.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// Returns the stored text, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.raw
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, snapshot: &serde_json::Value) -> Result<(), DomainError> {
        let text = serde_json::to_string(snapshot)
            .map_err(|e| DomainError::Persistence(format!("failed to encode save: {e}")))?;
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = Some(text);
        Ok(())
    }

    fn load(&self) -> Option<serde_json::Value> {
        let raw = self.raw()?;
        serde_json::from_str(&raw)
            .inspect_err(|e| warn!(error = %e, "ignoring corrupt save"))
            .ok()
    }

    fn clear(&self) -> Result<(), DomainError> {
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
