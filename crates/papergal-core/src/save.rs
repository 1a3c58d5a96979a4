//! Save repository abstraction.
//!
//! A save repository holds exactly one snapshot under a fixed key. Snapshots
//! are opaque JSON values here; the session crate owns their shape.

use crate::error::DomainError;

/// Repository trait for the single persisted playthrough snapshot.
///
/// Writes are synchronous: a transition is not done until `save` or `clear`
/// has returned.
pub trait SaveRepository: Send + Sync {
    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the write fails.
    fn save(&self, snapshot: &serde_json::Value) -> Result<(), DomainError>;

    /// Returns the stored snapshot, or `None` when nothing is stored or the
    /// stored data cannot be parsed.
    fn load(&self) -> Option<serde_json::Value>;

    /// Removes the stored snapshot. Clearing an empty repository succeeds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the removal fails.
    fn clear(&self) -> Result<(), DomainError>;
}
