//! The presentation-boundary facade.
//!
//! One `Engine` owns the loaded content and a single playthrough. A host
//! drives it with the action methods and draws whatever [`Engine::render`]
//! returns after each one.

use std::fmt;
use std::sync::Arc;

use papergal_content::application::loader::{self, ContentSource, FileContentSource};
use papergal_content::domain::index::ContentIndex;
use papergal_core::clock::{Clock, SystemClock};
use papergal_core::mode::{Audience, Guide};
use papergal_core::save::SaveRepository;
use papergal_narrative::application::command_handlers::{self, TransitionReport};
use papergal_narrative::application::query_handlers::{self, PlaythroughView, ScreenView};
use papergal_narrative::domain::aggregates::{AnswerFeedback, Playthrough};
use papergal_narrative::domain::commands;
use papergal_narrative::domain::transition::{AdvanceOutcome, TransitionPolicy};
use papergal_save_store::file_save_repository::FileSaveRepository;
use papergal_session::domain::catalog::ModeCatalog;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// A booted engine: content loaded, playthrough on the menu.
pub struct Engine {
    content: Arc<ContentIndex>,
    playthrough: Playthrough,
    catalog: ModeCatalog,
    policy: TransitionPolicy,
    saves: Arc<dyn SaveRepository>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("content_version", &self.content.version_hash())
            .field("playthrough", &self.playthrough)
            .field("catalog", &self.catalog)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Loads the configured content file and opens the configured save.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Load` if the content cannot be read or parsed.
    #[instrument(skip_all, fields(content_source = %config.content_source.display()))]
    pub async fn boot(config: &EngineConfig) -> Result<Self, EngineError> {
        let source = FileContentSource::new(config.content_source.clone());
        let saves = Arc::new(FileSaveRepository::new(&config.save_dir, &config.save_key));
        Self::boot_from(&source, config, saves, Arc::new(SystemClock)).await
    }

    /// Loads content from any source, with injected persistence and clock.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Load` if the content cannot be read or parsed.
    pub async fn boot_from(
        source: &dyn ContentSource,
        config: &EngineConfig,
        saves: Arc<dyn SaveRepository>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, EngineError> {
        let content = loader::load(source).await?;
        Ok(Self::with_parts(content, config, saves, clock))
    }

    /// Assembles an engine around already-loaded content.
    #[must_use]
    pub fn with_parts(
        content: ContentIndex,
        config: &EngineConfig,
        saves: Arc<dyn SaveRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let catalog = config.mode_catalog(content.labels());
        let playthrough = Playthrough::new(Uuid::new_v4(), content.first_scene_id());
        info!(
            playthrough_id = %playthrough.id,
            content_version = content.version_hash(),
            "engine ready"
        );
        Self {
            content: Arc::new(content),
            playthrough,
            catalog,
            policy: config.transition_policy(),
            saves,
            clock,
        }
    }

    /// The loaded content.
    #[must_use]
    pub fn content(&self) -> &ContentIndex {
        &self.content
    }

    /// Audiences and guides offered on the menu.
    #[must_use]
    pub fn catalog(&self) -> &ModeCatalog {
        &self.catalog
    }

    /// Begins a fresh playthrough.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` if the audience or guide is not offered.
    #[instrument(skip(self), fields(playthrough_id = %self.playthrough.id))]
    pub fn start_playthrough(
        &mut self,
        audience: Audience,
        guide: Guide,
    ) -> Result<TransitionReport<()>, EngineError> {
        let command = commands::StartPlaythrough {
            correlation_id: Uuid::new_v4(),
            audience,
            guide,
        };

        info!(correlation_id = %command.correlation_id, "handling start_playthrough command");

        Ok(command_handlers::handle_start_playthrough(
            &command,
            &mut self.playthrough,
            &self.content,
            &self.catalog,
            self.clock.as_ref(),
            self.saves.as_ref(),
        )?)
    }

    /// Moves past the current scene.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` if no playthrough is running or the
    /// current scene cannot be resolved.
    #[instrument(skip(self), fields(playthrough_id = %self.playthrough.id))]
    pub fn advance(&mut self) -> Result<TransitionReport<AdvanceOutcome>, EngineError> {
        let command = commands::Advance {
            correlation_id: Uuid::new_v4(),
        };

        info!(correlation_id = %command.correlation_id, "handling advance command");

        Ok(command_handlers::handle_advance(
            &command,
            &mut self.playthrough,
            &self.content,
            &self.policy,
            self.clock.as_ref(),
            self.saves.as_ref(),
        )?)
    }

    /// Answers the current quiz.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` if no playthrough is running, the scene
    /// is not a quiz, or the option does not exist.
    #[instrument(skip(self), fields(playthrough_id = %self.playthrough.id))]
    pub fn answer_option(
        &mut self,
        option_id: &str,
    ) -> Result<TransitionReport<AnswerFeedback>, EngineError> {
        let command = commands::AnswerOption {
            correlation_id: Uuid::new_v4(),
            option_id: option_id.to_owned(),
        };

        info!(correlation_id = %command.correlation_id, "handling answer_option command");

        Ok(command_handlers::handle_answer_option(
            &command,
            &mut self.playthrough,
            &self.content,
            self.clock.as_ref(),
            self.saves.as_ref(),
        )?)
    }

    /// Continues the saved playthrough.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` wrapping `RestoreUnavailable` if nothing
    /// usable is saved. The engine is left unchanged.
    #[instrument(skip(self), fields(playthrough_id = %self.playthrough.id))]
    pub fn resume_playthrough(&mut self) -> Result<TransitionReport<()>, EngineError> {
        let command = commands::ResumePlaythrough {
            correlation_id: Uuid::new_v4(),
        };

        info!(correlation_id = %command.correlation_id, "handling resume_playthrough command");

        Ok(command_handlers::handle_resume_playthrough(
            &command,
            &mut self.playthrough,
            self.clock.as_ref(),
            self.saves.as_ref(),
        )?)
    }

    /// Deletes the save and shows the menu.
    #[instrument(skip(self), fields(playthrough_id = %self.playthrough.id))]
    pub fn reset_playthrough(&mut self) -> TransitionReport<()> {
        let command = commands::ResetPlaythrough {
            correlation_id: Uuid::new_v4(),
        };

        info!(correlation_id = %command.correlation_id, "handling reset_playthrough command");

        command_handlers::handle_reset_playthrough(
            &command,
            &mut self.playthrough,
            self.clock.as_ref(),
            self.saves.as_ref(),
        )
    }

    /// Shows the menu without touching the save.
    #[instrument(skip(self), fields(playthrough_id = %self.playthrough.id))]
    pub fn return_to_menu(&mut self) -> TransitionReport<()> {
        let command = commands::ReturnToMenu {
            correlation_id: Uuid::new_v4(),
        };

        info!(correlation_id = %command.correlation_id, "handling return_to_menu command");

        command_handlers::handle_return_to_menu(&command, &mut self.playthrough, self.clock.as_ref())
    }

    /// What the host should draw now.
    #[must_use]
    pub fn render(&self) -> ScreenView {
        query_handlers::render_current_scene(&self.playthrough, &self.content)
    }

    /// Summary of the playthrough, including the quiz score.
    #[must_use]
    pub fn playthrough_view(&self) -> PlaythroughView {
        query_handlers::get_playthrough_view(&self.playthrough)
    }

    /// The persisted snapshot, pretty-printed.
    #[must_use]
    pub fn inspect_save(&self) -> Option<String> {
        query_handlers::inspect_save(self.saves.as_ref())
    }

    /// Where the ending's call-to-action leads, if anywhere.
    #[must_use]
    pub fn exit_destination(&self) -> Option<&str> {
        query_handlers::exit_destination(&self.content)
    }
}
