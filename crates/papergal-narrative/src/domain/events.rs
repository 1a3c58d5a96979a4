//! Domain events for the Narrative context.

use papergal_core::event::{DomainEvent, EventMetadata};
use papergal_core::mode::{Audience, Guide};
use papergal_session::domain::state::SessionState;
use serde::{Deserialize, Serialize};

/// Emitted when a fresh playthrough begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaythroughStarted {
    /// The selected audience.
    pub audience: Audience,
    /// The selected guide.
    pub guide: Guide,
    /// The entry scene.
    pub scene_id: String,
}

/// Emitted when the playthrough moves to another scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEntered {
    /// The scene that was left.
    pub from_scene_id: String,
    /// The scene now current.
    pub scene_id: String,
}

/// Emitted when a quiz option is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswered {
    /// The quiz scene.
    pub scene_id: String,
    /// The chosen option.
    pub option_id: String,
    /// Whether the option is marked correct.
    pub correct: bool,
}

/// Emitted when a saved playthrough replaces the in-memory one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaythroughRestored {
    /// The restored state.
    pub state: SessionState,
}

/// Emitted when the viewer leaves for the menu with the save intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnedToMenu {
    /// The scene the viewer left.
    pub scene_id: String,
}

/// Emitted when the save is deleted and the viewer is sent to the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaythroughReset {
    /// The scene the viewer left.
    pub scene_id: String,
}

/// Event type identifier for [`PlaythroughStarted`].
pub const PLAYTHROUGH_STARTED_EVENT_TYPE: &str = "narrative.playthrough_started";

/// Event type identifier for [`SceneEntered`].
pub const SCENE_ENTERED_EVENT_TYPE: &str = "narrative.scene_entered";

/// Event type identifier for [`QuizAnswered`].
pub const QUIZ_ANSWERED_EVENT_TYPE: &str = "narrative.quiz_answered";

/// Event type identifier for [`PlaythroughRestored`].
pub const PLAYTHROUGH_RESTORED_EVENT_TYPE: &str = "narrative.playthrough_restored";

/// Event type identifier for [`ReturnedToMenu`].
pub const RETURNED_TO_MENU_EVENT_TYPE: &str = "narrative.returned_to_menu";

/// Event type identifier for [`PlaythroughReset`].
pub const PLAYTHROUGH_RESET_EVENT_TYPE: &str = "narrative.playthrough_reset";

/// Event payload variants for the Narrative context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaythroughEventKind {
    /// A fresh playthrough has begun.
    PlaythroughStarted(PlaythroughStarted),
    /// The current scene has changed.
    SceneEntered(SceneEntered),
    /// A quiz has been answered.
    QuizAnswered(QuizAnswered),
    /// A saved playthrough has been restored.
    PlaythroughRestored(PlaythroughRestored),
    /// The viewer went back to the menu.
    ReturnedToMenu(ReturnedToMenu),
    /// The save was deleted.
    PlaythroughReset(PlaythroughReset),
}

impl PlaythroughEventKind {
    /// Returns the event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PlaythroughStarted(_) => PLAYTHROUGH_STARTED_EVENT_TYPE,
            Self::SceneEntered(_) => SCENE_ENTERED_EVENT_TYPE,
            Self::QuizAnswered(_) => QUIZ_ANSWERED_EVENT_TYPE,
            Self::PlaythroughRestored(_) => PLAYTHROUGH_RESTORED_EVENT_TYPE,
            Self::ReturnedToMenu(_) => RETURNED_TO_MENU_EVENT_TYPE,
            Self::PlaythroughReset(_) => PLAYTHROUGH_RESET_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Narrative context.
#[derive(Debug, Clone)]
pub struct PlaythroughEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PlaythroughEventKind,
}

impl DomainEvent for PlaythroughEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Derived Serialize impls over strings and bools cannot fail.
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
