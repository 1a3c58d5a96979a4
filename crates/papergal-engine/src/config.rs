//! Engine configuration.

use std::path::PathBuf;

use papergal_content::domain::scene::Labels;
use papergal_core::mode::{Audience, EXPERT, Guide, INFORMED, LAY, SENPAI};
use papergal_narrative::domain::transition::{DEFAULT_ENDING_SCENE_ID, TransitionPolicy};
use papergal_save_store::DEFAULT_SAVE_KEY;
use papergal_session::domain::catalog::ModeCatalog;

use crate::error::EngineError;

/// Environment variable naming the content document.
pub const CONTENT_ENV_VAR: &str = "PAPERGAL_CONTENT";

/// Settings needed to boot an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Path of the JSON or YAML content document.
    pub content_source: PathBuf,
    /// Directory holding the save file.
    pub save_dir: PathBuf,
    /// Key the snapshot is stored under.
    pub save_key: String,
    /// Scene entered when a scene has no `next`.
    pub ending_scene_id: String,
    /// Selectable audiences. When unset, the built-in audiences plus any
    /// the content labels.
    pub audiences: Option<Vec<Audience>>,
    /// Selectable guides. When unset, the built-in guide plus any the
    /// content labels.
    pub guides: Option<Vec<Guide>>,
}

impl EngineConfig {
    /// Creates a configuration with defaults for everything but the content
    /// location.
    #[must_use]
    pub fn new(content_source: impl Into<PathBuf>) -> Self {
        Self {
            content_source: content_source.into(),
            save_dir: PathBuf::from("."),
            save_key: DEFAULT_SAVE_KEY.to_owned(),
            ending_scene_id: DEFAULT_ENDING_SCENE_ID.to_owned(),
            audiences: None,
            guides: None,
        }
    }

    /// Reads the content location from `PAPERGAL_CONTENT`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if the variable is unset or empty.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let content_source = lookup(CONTENT_ENV_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                EngineError::Config(format!("{CONTENT_ENV_VAR} environment variable must be set"))
            })?;
        Ok(Self::new(content_source))
    }

    /// Sets the save directory.
    #[must_use]
    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = save_dir.into();
        self
    }

    /// Sets the save key.
    #[must_use]
    pub fn with_save_key(mut self, save_key: impl Into<String>) -> Self {
        self.save_key = save_key.into();
        self
    }

    /// Sets the fallback ending scene.
    #[must_use]
    pub fn with_ending_scene_id(mut self, ending_scene_id: impl Into<String>) -> Self {
        self.ending_scene_id = ending_scene_id.into();
        self
    }

    /// Restricts the selectable audiences.
    #[must_use]
    pub fn with_audiences(mut self, audiences: Vec<Audience>) -> Self {
        self.audiences = Some(audiences);
        self
    }

    /// Restricts the selectable guides.
    #[must_use]
    pub fn with_guides(mut self, guides: Vec<Guide>) -> Self {
        self.guides = Some(guides);
        self
    }

    /// Builds the mode catalog.
    ///
    /// Explicit lists win. Otherwise every built-in id is selectable, labelled
    /// or not, and any other labelled ids are added after them.
    #[must_use]
    pub fn mode_catalog(&self, labels: &Labels) -> ModeCatalog {
        let audiences = self.audiences.clone().unwrap_or_else(|| {
            ordered_ids(labels.audiences.keys().map(Audience::as_str), &[LAY, INFORMED, EXPERT])
                .into_iter()
                .map(Audience::from)
                .collect()
        });
        let guides = self.guides.clone().unwrap_or_else(|| {
            ordered_ids(labels.guides.keys().map(Guide::as_str), &[SENPAI])
                .into_iter()
                .map(Guide::from)
                .collect()
        });
        ModeCatalog::new(audiences, guides)
    }

    /// Builds the transition policy.
    #[must_use]
    pub fn transition_policy(&self) -> TransitionPolicy {
        TransitionPolicy {
            ending_scene_id: self.ending_scene_id.clone(),
        }
    }
}

/// The built-in ids in their usual order, then any other labelled ids
/// alphabetically.
fn ordered_ids<'a>(
    labelled: impl Iterator<Item = &'a str>,
    built_in: &[&'a str],
) -> Vec<&'a str> {
    let mut extra: Vec<&str> = labelled.filter(|id| !built_in.contains(id)).collect();
    extra.sort_unstable();
    extra.dedup();
    built_in.iter().copied().chain(extra).collect()
}
