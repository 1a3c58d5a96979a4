//! Aggregate root for the Narrative context.

use papergal_content::domain::index::ContentIndex;
use papergal_content::domain::scene::{Scene, SceneKind};
use papergal_core::aggregate::AggregateRoot;
use papergal_core::clock::Clock;
use papergal_core::error::DomainError;
use papergal_core::event::EventMetadata;
use papergal_core::mode::{Audience, Guide};
use papergal_session::application::snapshot;
use papergal_session::domain::catalog::ModeCatalog;
use papergal_session::domain::state::{QuizAnswer, SessionState};
use serde::Serialize;
use uuid::Uuid;

use super::events::{
    PlaythroughEvent, PlaythroughEventKind, PlaythroughReset, PlaythroughRestored,
    PlaythroughStarted, QuizAnswered, ReturnedToMenu, SceneEntered,
};
use super::resolution::resolve_localized_text;
use super::transition::{AdvanceOutcome, StayReason, TransitionPolicy};

/// Which screen the viewer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// The pre-playthrough menu.
    Menu,
    /// Inside a playthrough.
    Scene,
}

/// What the viewer is told after answering a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    /// The chosen option.
    pub option_id: String,
    /// Whether it is marked correct.
    pub correct: bool,
    /// Resolved feedback text.
    pub feedback: String,
}

/// The aggregate root for a viewer's playthrough.
///
/// Every mutation goes through a named transition that records an event;
/// `apply` is the only place state changes.
#[derive(Debug)]
pub struct Playthrough {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// The session record.
    pub(crate) state: SessionState,
    /// The current screen.
    pub(crate) screen: Screen,
    /// Events recorded since the last drain.
    uncommitted_events: Vec<PlaythroughEvent>,
}

impl Playthrough {
    /// Creates a playthrough on the menu screen, positioned at `entry`.
    #[must_use]
    pub fn new(id: Uuid, entry: &str) -> Self {
        Self {
            id,
            version: 0,
            state: SessionState::initial(entry),
            screen: Screen::Menu,
            uncommitted_events: Vec::new(),
        }
    }

    /// The session record.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The current screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Resolves the current scene.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownScene` if the id does not resolve and
    /// `DomainError::UnknownSceneKind` if the scene's kind is unrecognized.
    pub fn current_scene<'c>(&self, content: &'c ContentIndex) -> Result<&'c Scene, DomainError> {
        let scene_id = self.state.scene_id();
        let scene = content
            .get(scene_id)
            .ok_or_else(|| DomainError::UnknownScene(scene_id.to_owned()))?;
        if let SceneKind::Other(kind) = &scene.kind {
            return Err(DomainError::UnknownSceneKind {
                scene_id: scene.id.clone(),
                kind: kind.clone(),
            });
        }
        Ok(scene)
    }

    /// Begins a fresh playthrough at the first scene, discarding answers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the audience or guide is not in
    /// the catalog.
    pub fn start(
        &mut self,
        audience: Audience,
        guide: Guide,
        catalog: &ModeCatalog,
        content: &ContentIndex,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        catalog.validate(&audience, &guide)?;
        self.record(
            PlaythroughEventKind::PlaythroughStarted(PlaythroughStarted {
                audience,
                guide,
                scene_id: content.first_scene_id().to_owned(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Moves past the current scene.
    ///
    /// Dialogs follow `next`; quizzes follow `next` only once answered;
    /// endings never move.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoActivePlaythrough` on the menu, and the errors
    /// of [`Playthrough::current_scene`] otherwise.
    pub fn advance(
        &mut self,
        content: &ContentIndex,
        policy: &TransitionPolicy,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<AdvanceOutcome, DomainError> {
        self.ensure_in_scene()?;
        let scene = self.current_scene(content)?;

        match scene.kind {
            SceneKind::Quiz if self.state.answer_for(&scene.id).is_none() => {
                Ok(AdvanceOutcome::Stayed {
                    reason: StayReason::AnswerRequired,
                })
            }
            SceneKind::Dialog | SceneKind::Quiz => {
                Ok(self.advance_to(scene.successor(), content, policy, correlation_id, clock))
            }
            SceneKind::Ending | SceneKind::Other(_) => Ok(AdvanceOutcome::Stayed {
                reason: StayReason::Terminal,
            }),
        }
    }

    /// Moves to `next`, or to the policy's ending scene when `next` is
    /// missing or empty. Stays put when neither exists.
    pub fn advance_to(
        &mut self,
        next: Option<&str>,
        content: &ContentIndex,
        policy: &TransitionPolicy,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> AdvanceOutcome {
        let Some(target) = policy.resolve_successor(content, next) else {
            return AdvanceOutcome::Stayed {
                reason: StayReason::NoSuccessor,
            };
        };
        self.record(
            PlaythroughEventKind::SceneEntered(SceneEntered {
                from_scene_id: self.state.scene_id().to_owned(),
                scene_id: target.clone(),
            }),
            correlation_id,
            clock,
        );
        AdvanceOutcome::Entered { scene_id: target }
    }

    /// Records the chosen option for the current quiz, overwriting any
    /// earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoActivePlaythrough` on the menu,
    /// `DomainError::Validation` if the scene is not a quiz or has no such
    /// option, and the errors of [`Playthrough::current_scene`] otherwise.
    pub fn answer_option(
        &mut self,
        option_id: &str,
        content: &ContentIndex,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<AnswerFeedback, DomainError> {
        self.ensure_in_scene()?;
        let scene = self.current_scene(content)?;
        if scene.kind != SceneKind::Quiz {
            return Err(DomainError::Validation(format!(
                "scene {} is not a quiz",
                scene.id
            )));
        }
        let option = scene.option(option_id).ok_or_else(|| {
            DomainError::Validation(format!("scene {} has no option {option_id}", scene.id))
        })?;

        self.record(
            PlaythroughEventKind::QuizAnswered(QuizAnswered {
                scene_id: scene.id.clone(),
                option_id: option.id.clone(),
                correct: option.correct,
            }),
            correlation_id,
            clock,
        );

        Ok(AnswerFeedback {
            option_id: option.id.clone(),
            correct: option.correct,
            feedback: resolve_localized_text(&option.feedback, self.state.audience()),
        })
    }

    /// Replaces the session record with a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RestoreUnavailable` if there is no snapshot or
    /// it cannot be decoded.
    pub fn restore(
        &mut self,
        persisted: Option<&serde_json::Value>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let state = persisted
            .and_then(|snapshot| snapshot::restore_over(&self.state, snapshot))
            .ok_or(DomainError::RestoreUnavailable)?;
        self.record(
            PlaythroughEventKind::PlaythroughRestored(PlaythroughRestored { state }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Goes back to the menu, keeping the session record.
    pub fn return_to_menu(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.record(
            PlaythroughEventKind::ReturnedToMenu(ReturnedToMenu {
                scene_id: self.state.scene_id().to_owned(),
            }),
            correlation_id,
            clock,
        );
    }

    /// Goes back to the menu after the save has been deleted.
    pub fn reset(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.record(
            PlaythroughEventKind::PlaythroughReset(PlaythroughReset {
                scene_id: self.state.scene_id().to_owned(),
            }),
            correlation_id,
            clock,
        );
    }

    fn ensure_in_scene(&self) -> Result<(), DomainError> {
        match self.screen {
            Screen::Scene => Ok(()),
            Screen::Menu => Err(DomainError::NoActivePlaythrough),
        }
    }

    /// Returns the next sequence number for a new event.
    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    fn record(&mut self, kind: PlaythroughEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = PlaythroughEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                playthrough_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

impl AggregateRoot for Playthrough {
    type Event = PlaythroughEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            PlaythroughEventKind::PlaythroughStarted(payload) => {
                self.state = SessionState::begin(
                    payload.audience.clone(),
                    payload.guide.clone(),
                    payload.scene_id.clone(),
                );
                self.screen = Screen::Scene;
            }
            PlaythroughEventKind::SceneEntered(payload) => {
                self.state.enter_scene(payload.scene_id.clone());
            }
            PlaythroughEventKind::QuizAnswered(payload) => {
                self.state.record_answer(
                    payload.scene_id.clone(),
                    QuizAnswer {
                        chosen_option_id: payload.option_id.clone(),
                        was_correct: payload.correct,
                    },
                );
            }
            PlaythroughEventKind::PlaythroughRestored(payload) => {
                self.state = payload.state.clone();
                self.screen = Screen::Scene;
            }
            PlaythroughEventKind::ReturnedToMenu(_) | PlaythroughEventKind::PlaythroughReset(_) => {
                self.screen = Screen::Menu;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
