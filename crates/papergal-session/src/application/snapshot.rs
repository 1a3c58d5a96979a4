//! Snapshot encoding and restore.
//!
//! Restore is a shallow merge: every top-level key present in the persisted
//! object replaces the same key of the in-memory state, and keys the blob
//! lacks keep their in-memory values. Older saves with fewer keys therefore
//! still restore. Nested values are replaced whole, never merged.

use papergal_core::error::DomainError;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::state::SessionState;

/// Top-level keys written by earlier save formats, and their current names.
const LEGACY_KEYS: &[(&str, &str)] = &[("quiz", "quizAnswers")];

/// Encodes the state as a snapshot value.
///
/// # Errors
///
/// Returns `DomainError::Persistence` if the state cannot be serialized.
pub fn encode(state: &SessionState) -> Result<Value, DomainError> {
    serde_json::to_value(state)
        .map_err(|e| DomainError::Persistence(format!("snapshot encoding failed: {e}")))
}

/// Overlays a persisted snapshot onto `current`.
///
/// Returns `None` when the snapshot is not a JSON object or the merged value
/// does not decode; both are treated as "nothing saved".
#[must_use]
pub fn restore_over(current: &SessionState, persisted: &Value) -> Option<SessionState> {
    let Value::Object(saved) = persisted else {
        warn!("saved playthrough is not an object; ignoring it");
        return None;
    };

    let mut merged = match encode(current) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => Map::new(),
    };
    for (key, value) in saved {
        merged.insert(upgrade_key(key).to_owned(), value.clone());
    }

    serde_json::from_value(Value::Object(merged))
        .map_err(|e| warn!(error = %e, "saved playthrough does not decode; ignoring it"))
        .ok()
}

fn upgrade_key(key: &str) -> &str {
    LEGACY_KEYS
        .iter()
        .find(|(legacy, _)| *legacy == key)
        .map_or(key, |&(_, current)| current)
}
