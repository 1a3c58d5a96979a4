//! Query handlers for the Narrative context.
//!
//! Builds the render requests handed to the presentation layer. Queries never
//! mutate the playthrough.

use papergal_content::domain::index::ContentIndex;
use papergal_content::domain::scene::{DialogLine, SceneKind};
use papergal_core::aggregate::AggregateRoot;
use papergal_core::error::DomainError;
use papergal_core::mode::{Audience, Guide};
use papergal_core::save::SaveRepository;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::domain::aggregates::{AnswerFeedback, Playthrough, Screen};
use crate::domain::resolution::{
    DEFAULT_CHAPTER, mode_label, resolve_cta_text, resolve_dialog_line, resolve_localized_text,
    resolve_prompt,
};

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    /// The mode-selection menu.
    Menu,
    /// The current scene.
    Scene(SceneView),
    /// The current scene cannot be shown. No transition leaves this state
    /// except a restart.
    Error {
        /// Message to display verbatim.
        diagnostic: String,
    },
}

/// Render request for one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneView {
    /// Scene identifier.
    pub scene_id: String,
    /// Chapter chip.
    pub chapter: String,
    /// `"<audience> · <guide>"` chip.
    pub mode_label: String,
    /// Kind-specific content.
    pub body: SceneBody,
}

/// Kind-specific part of a [`SceneView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneBody {
    /// A single line of dialog.
    Dialog {
        /// The resolved line.
        line: DialogLine,
    },
    /// A quiz prompt with its options.
    Quiz {
        /// The resolved prompt.
        prompt: String,
        /// Options in content order.
        options: Vec<OptionView>,
        /// The recorded answer, if the quiz was already answered.
        answer: Option<AnswerFeedback>,
    },
    /// The closing scene.
    Ending {
        /// The resolved closing line.
        line: DialogLine,
        /// Call-to-action button text.
        cta_text: String,
        /// Where the call-to-action leads, if anywhere.
        redirect_url: Option<String>,
    },
}

/// One quiz option as shown to the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    /// Option identifier, passed back to `answer_option`.
    pub id: String,
    /// Resolved option text.
    pub text: String,
}

/// Read model summarising a playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaythroughView {
    /// Aggregate identifier.
    pub playthrough_id: Uuid,
    /// The selected audience.
    pub audience: Audience,
    /// The selected guide.
    pub guide: Guide,
    /// The current scene.
    pub scene_id: String,
    /// The current screen.
    pub screen: Screen,
    /// Number of quizzes answered.
    pub answered: usize,
    /// Number of quizzes answered correctly.
    pub correct: usize,
    /// Current aggregate version.
    pub version: i64,
}

/// Builds the render request for whatever the viewer should see now.
#[must_use]
pub fn render_current_scene(playthrough: &Playthrough, content: &ContentIndex) -> ScreenView {
    if playthrough.screen() == Screen::Menu {
        return ScreenView::Menu;
    }

    let scene = match playthrough.current_scene(content) {
        Ok(scene) => scene,
        Err(e) => {
            debug!(playthrough_id = %playthrough.id, error = %e, "rendering error state");
            return ScreenView::Error {
                diagnostic: e.to_string(),
            };
        }
    };

    let state = playthrough.state();
    let audience = state.audience();
    let body = match scene.kind {
        SceneKind::Dialog => SceneBody::Dialog {
            line: resolve_dialog_line(scene, audience, state.guide()),
        },
        SceneKind::Quiz => SceneBody::Quiz {
            prompt: resolve_prompt(scene, audience),
            options: scene
                .options
                .iter()
                .map(|option| OptionView {
                    id: option.id.clone(),
                    text: resolve_localized_text(&option.text, audience),
                })
                .collect(),
            answer: state.answer_for(&scene.id).map(|answer| AnswerFeedback {
                option_id: answer.chosen_option_id.clone(),
                correct: answer.was_correct,
                feedback: scene
                    .option(&answer.chosen_option_id)
                    .map(|option| resolve_localized_text(&option.feedback, audience))
                    .unwrap_or_default(),
            }),
        },
        SceneKind::Ending => SceneBody::Ending {
            line: resolve_dialog_line(scene, audience, state.guide()),
            cta_text: resolve_cta_text(scene, content.meta(), audience),
            redirect_url: content.meta().redirect_url.clone(),
        },
        SceneKind::Other(ref kind) => {
            let error = DomainError::UnknownSceneKind {
                scene_id: scene.id.clone(),
                kind: kind.clone(),
            };
            debug!(playthrough_id = %playthrough.id, error = %error, "rendering error state");
            return ScreenView::Error {
                diagnostic: error.to_string(),
            };
        }
    };

    ScreenView::Scene(SceneView {
        scene_id: scene.id.clone(),
        chapter: scene
            .chapter
            .clone()
            .filter(|chapter| !chapter.is_empty())
            .unwrap_or_else(|| DEFAULT_CHAPTER.to_owned()),
        mode_label: mode_label(audience, state.guide(), content.labels()),
        body,
    })
}

/// Summarises a playthrough.
#[must_use]
pub fn get_playthrough_view(playthrough: &Playthrough) -> PlaythroughView {
    let state = playthrough.state();
    PlaythroughView {
        playthrough_id: playthrough.id,
        audience: state.audience().clone(),
        guide: state.guide().clone(),
        scene_id: state.scene_id().to_owned(),
        screen: playthrough.screen(),
        answered: state.quiz_answers().len(),
        correct: state.correct_answers(),
        version: playthrough.version(),
    }
}

/// Returns the persisted snapshot pretty-printed, or `None` if nothing is
/// saved.
#[must_use]
pub fn inspect_save(repo: &dyn SaveRepository) -> Option<String> {
    repo.load()
        .and_then(|snapshot| serde_json::to_string_pretty(&snapshot).ok())
}

/// Where the ending's call-to-action leads, if the content configures it.
#[must_use]
pub fn exit_destination(content: &ContentIndex) -> Option<&str> {
    content
        .meta()
        .redirect_url
        .as_deref()
        .filter(|url| !url.is_empty())
}
