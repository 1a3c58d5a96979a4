//! Test repositories — mock `SaveRepository` implementations for tests.

use std::sync::Mutex;

use papergal_core::error::DomainError;
use papergal_core::save::SaveRepository;

/// A save repository that keeps the snapshot in memory and records every
/// `save` and `clear` call.
#[derive(Debug, Default)]
pub struct RecordingSaveRepository {
    stored: Mutex<Option<serde_json::Value>>,
    saved: Mutex<Vec<serde_json::Value>>,
    clears: Mutex<usize>,
}

impl RecordingSaveRepository {
    /// Create an empty recording repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording repository that already holds `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: serde_json::Value) -> Self {
        Self {
            stored: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Returns every snapshot passed to `save`, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_snapshots(&self) -> Vec<serde_json::Value> {
        self.saved.lock().unwrap().clone()
    }

    /// Returns the most recent snapshot passed to `save`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_saved(&self) -> Option<serde_json::Value> {
        self.saved.lock().unwrap().last().cloned()
    }

    /// Returns how many times `clear` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

impl SaveRepository for RecordingSaveRepository {
    fn save(&self, snapshot: &serde_json::Value) -> Result<(), DomainError> {
        self.saved.lock().unwrap().push(snapshot.clone());
        *self.stored.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Option<serde_json::Value> {
        self.stored.lock().unwrap().clone()
    }

    fn clear(&self) -> Result<(), DomainError> {
        *self.clears.lock().unwrap() += 1;
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

/// A save repository whose writes always fail and which never holds a
/// snapshot. Useful for testing persistence-warning paths.
#[derive(Debug)]
pub struct FailingSaveRepository;

impl SaveRepository for FailingSaveRepository {
    fn save(&self, _snapshot: &serde_json::Value) -> Result<(), DomainError> {
        Err(DomainError::Persistence("disk full".into()))
    }

    fn load(&self) -> Option<serde_json::Value> {
        None
    }

    fn clear(&self) -> Result<(), DomainError> {
        Err(DomainError::Persistence("disk full".into()))
    }
}
