//! Command handlers for the Narrative context.
//!
//! Each handler runs one transition on the playthrough, persists the
//! resulting session record, and returns the recorded events. A failed save
//! does not undo the transition; it is logged and reported back as a
//! warning so the host can tell the viewer.

use papergal_content::domain::index::ContentIndex;
use papergal_core::aggregate::AggregateRoot;
use papergal_core::clock::Clock;
use papergal_core::error::DomainError;
use papergal_core::save::SaveRepository;
use papergal_session::application::snapshot;
use papergal_session::domain::catalog::ModeCatalog;
use tracing::warn;

use crate::domain::aggregates::{AnswerFeedback, Playthrough};
use crate::domain::commands::{
    Advance, AnswerOption, ResetPlaythrough, ResumePlaythrough, ReturnToMenu, StartPlaythrough,
};
use crate::domain::events::PlaythroughEvent;
use crate::domain::transition::{AdvanceOutcome, TransitionPolicy};

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct TransitionReport<T> {
    /// Command-specific result.
    pub outcome: T,
    /// Events recorded by the transition.
    pub events: Vec<PlaythroughEvent>,
    /// Set when the save repository rejected the write or clear.
    pub persistence_warning: Option<String>,
}

fn persist(playthrough: &Playthrough, repo: &dyn SaveRepository) -> Option<String> {
    let result = snapshot::encode(playthrough.state()).and_then(|value| repo.save(&value));
    result.err().map(|e| {
        warn!(playthrough_id = %playthrough.id, error = %e, "failed to save playthrough");
        e.to_string()
    })
}

fn report<T>(
    playthrough: &mut Playthrough,
    outcome: T,
    persistence_warning: Option<String>,
) -> TransitionReport<T> {
    TransitionReport {
        outcome,
        events: playthrough.take_uncommitted_events(),
        persistence_warning,
    }
}

/// Handles the `StartPlaythrough` command: resets answers, fixes the modes,
/// moves to the first scene, and saves.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the audience or guide is unknown.
pub fn handle_start_playthrough(
    command: &StartPlaythrough,
    playthrough: &mut Playthrough,
    content: &ContentIndex,
    catalog: &ModeCatalog,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<TransitionReport<()>, DomainError> {
    playthrough.start(
        command.audience.clone(),
        command.guide.clone(),
        catalog,
        content,
        command.correlation_id,
        clock,
    )?;
    let warning = persist(playthrough, repo);
    Ok(report(playthrough, (), warning))
}

/// Handles the `Advance` command. Saves only when the scene changed.
///
/// # Errors
///
/// Returns `DomainError` if no playthrough is running or the current scene
/// is missing or of an unknown kind.
pub fn handle_advance(
    command: &Advance,
    playthrough: &mut Playthrough,
    content: &ContentIndex,
    policy: &TransitionPolicy,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<TransitionReport<AdvanceOutcome>, DomainError> {
    let outcome = playthrough.advance(content, policy, command.correlation_id, clock)?;
    let warning = match outcome {
        AdvanceOutcome::Entered { .. } => persist(playthrough, repo),
        AdvanceOutcome::Stayed { .. } => None,
    };
    Ok(report(playthrough, outcome, warning))
}

/// Handles the `AnswerOption` command: records the answer, saves, and
/// returns the feedback to show.
///
/// # Errors
///
/// Returns `DomainError` if no playthrough is running, the current scene is
/// not a quiz, or the option does not exist.
pub fn handle_answer_option(
    command: &AnswerOption,
    playthrough: &mut Playthrough,
    content: &ContentIndex,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<TransitionReport<AnswerFeedback>, DomainError> {
    let feedback =
        playthrough.answer_option(&command.option_id, content, command.correlation_id, clock)?;
    let warning = persist(playthrough, repo);
    Ok(report(playthrough, feedback, warning))
}

/// Handles the `ResumePlaythrough` command: loads the save and replaces the
/// in-memory record with it.
///
/// # Errors
///
/// Returns `DomainError::RestoreUnavailable` if nothing usable is saved.
pub fn handle_resume_playthrough(
    command: &ResumePlaythrough,
    playthrough: &mut Playthrough,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<TransitionReport<()>, DomainError> {
    let persisted = repo.load();
    playthrough.restore(persisted.as_ref(), command.correlation_id, clock)?;
    Ok(report(playthrough, (), None))
}

/// Handles the `ResetPlaythrough` command: deletes the save and returns to
/// the menu. The in-memory record is left as it was.
pub fn handle_reset_playthrough(
    command: &ResetPlaythrough,
    playthrough: &mut Playthrough,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> TransitionReport<()> {
    let warning = repo.clear().err().map(|e| {
        warn!(playthrough_id = %playthrough.id, error = %e, "failed to clear saved playthrough");
        e.to_string()
    });
    playthrough.reset(command.correlation_id, clock);
    report(playthrough, (), warning)
}

/// Handles the `ReturnToMenu` command. The save is kept.
pub fn handle_return_to_menu(
    command: &ReturnToMenu,
    playthrough: &mut Playthrough,
    clock: &dyn Clock,
) -> TransitionReport<()> {
    playthrough.return_to_menu(command.correlation_id, clock);
    report(playthrough, (), None)
}
