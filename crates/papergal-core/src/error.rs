//! Domain error types.

use thiserror::Error;

/// Failure to load the scene graph. Fatal: nothing can render without content.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The content source could not be read.
    #[error("failed to load {location}: {reason}")]
    Unreachable {
        /// Where the content was expected (path or label).
        location: String,
        /// The underlying I/O failure.
        reason: String,
    },

    /// The document is not valid structured data, or has the wrong shape.
    #[error("malformed content document: {0}")]
    Malformed(String),

    /// The document has no `scenes` entries.
    #[error("content document has no scenes")]
    MissingScenes,

    /// Two scenes share an identifier.
    #[error("duplicate scene id: {0}")]
    DuplicateSceneId(String),
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The current scene id does not resolve in the content store.
    #[error("scene not found: {0}")]
    UnknownScene(String),

    /// The scene exists but carries an unrecognized kind.
    #[error("unknown scene kind `{kind}` on scene {scene_id}")]
    UnknownSceneKind {
        /// The offending scene.
        scene_id: String,
        /// The raw kind tag from the content document.
        kind: String,
    },

    /// Resume was requested but nothing usable is persisted.
    #[error("no saved playthrough to restore")]
    RestoreUnavailable,

    /// A gameplay action arrived while no playthrough is running.
    #[error("no playthrough in progress")]
    NoActivePlaythrough,

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The save repository failed to write or clear.
    #[error("persistence error: {0}")]
    Persistence(String),
}
