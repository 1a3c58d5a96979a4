//! The loaded, id-indexed scene graph.

use std::collections::HashMap;

use papergal_core::error::LoadError;

use super::scene::{ContentDocument, Labels, Meta, Scene};

/// Immutable scene graph with O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    scenes: Vec<Scene>,
    by_id: HashMap<String, usize>,
    labels: Labels,
    meta: Meta,
    version_hash: String,
}

impl ContentIndex {
    /// Indexes a parsed document.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingScenes` if the document has no scenes and
    /// `LoadError::DuplicateSceneId` if two scenes share an id.
    pub fn from_document(
        document: ContentDocument,
        version_hash: impl Into<String>,
    ) -> Result<Self, LoadError> {
        if document.scenes.is_empty() {
            return Err(LoadError::MissingScenes);
        }

        let mut by_id = HashMap::with_capacity(document.scenes.len());
        for (position, scene) in document.scenes.iter().enumerate() {
            if by_id.insert(scene.id.clone(), position).is_some() {
                return Err(LoadError::DuplicateSceneId(scene.id.clone()));
            }
        }

        Ok(Self {
            scenes: document.scenes,
            by_id,
            labels: document.labels,
            meta: document.meta,
            version_hash: version_hash.into(),
        })
    }

    /// Returns the scene with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.by_id.get(id).map(|&position| &self.scenes[position])
    }

    /// Returns whether a scene with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Id of the first scene in load order.
    #[must_use]
    pub fn first_scene_id(&self) -> &str {
        // Non-empty by construction.
        &self.scenes[0].id
    }

    /// All scenes in load order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Label lookup tables.
    #[must_use]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Document-wide settings.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// SHA-256 hex digest of the source document.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }

    /// `(scene id, next id)` pairs whose `next` names no scene.
    #[must_use]
    pub fn dangling_links(&self) -> Vec<(&str, &str)> {
        self.scenes
            .iter()
            .filter_map(|scene| {
                scene
                    .successor()
                    .filter(|next| !self.contains(next))
                    .map(|next| (scene.id.as_str(), next))
            })
            .collect()
    }
}
