//! Scene-to-scene transition policy.

use papergal_content::domain::index::ContentIndex;
use serde::Serialize;

/// Scene id used when content omits an explicit terminal link.
pub const DEFAULT_ENDING_SCENE_ID: &str = "ending";

/// Tunables for `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPolicy {
    /// Scene entered when the current scene has no `next`.
    pub ending_scene_id: String,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            ending_scene_id: DEFAULT_ENDING_SCENE_ID.to_owned(),
        }
    }
}

impl TransitionPolicy {
    /// Picks the scene an advance toward `next` lands on.
    ///
    /// A present, non-empty `next` is returned as-is, even if no scene has
    /// that id. A missing or empty `next` resolves to the ending scene when
    /// the content has one, and to `None` (stay put) otherwise.
    #[must_use]
    pub fn resolve_successor(&self, content: &ContentIndex, next: Option<&str>) -> Option<String> {
        match next.filter(|id| !id.is_empty()) {
            Some(id) => Some(id.to_owned()),
            None if content.contains(&self.ending_scene_id) => Some(self.ending_scene_id.clone()),
            None => None,
        }
    }
}

/// Result of an advance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// The playthrough moved to `scene_id`.
    Entered {
        /// The new current scene.
        scene_id: String,
    },
    /// The playthrough stayed on the current scene.
    Stayed {
        /// Why nothing moved.
        reason: StayReason,
    },
}

/// Why an advance did not move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StayReason {
    /// The quiz has not been answered yet.
    AnswerRequired,
    /// No `next` and no ending scene to fall back to.
    NoSuccessor,
    /// Endings have no successor.
    Terminal,
}
