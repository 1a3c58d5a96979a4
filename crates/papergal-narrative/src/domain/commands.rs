//! Commands for the Narrative context.

use papergal_core::command::Command;
use papergal_core::mode::{Audience, Guide};
use uuid::Uuid;

/// Command to begin a fresh playthrough.
#[derive(Debug, Clone)]
pub struct StartPlaythrough {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The reading lens for the whole playthrough.
    pub audience: Audience,
    /// The guide persona for the whole playthrough.
    pub guide: Guide,
}

impl Command for StartPlaythrough {
    fn command_type(&self) -> &'static str {
        "narrative.start_playthrough"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move past the current scene.
#[derive(Debug, Clone)]
pub struct Advance {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for Advance {
    fn command_type(&self) -> &'static str {
        "narrative.advance"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to answer the current quiz.
#[derive(Debug, Clone)]
pub struct AnswerOption {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The chosen option.
    pub option_id: String,
}

impl Command for AnswerOption {
    fn command_type(&self) -> &'static str {
        "narrative.answer_option"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to continue from the saved playthrough.
#[derive(Debug, Clone)]
pub struct ResumePlaythrough {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResumePlaythrough {
    fn command_type(&self) -> &'static str {
        "narrative.resume_playthrough"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete the saved playthrough and go back to the menu.
#[derive(Debug, Clone)]
pub struct ResetPlaythrough {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResetPlaythrough {
    fn command_type(&self) -> &'static str {
        "narrative.reset_playthrough"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to go back to the menu, keeping the save.
#[derive(Debug, Clone)]
pub struct ReturnToMenu {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ReturnToMenu {
    fn command_type(&self) -> &'static str {
        "narrative.return_to_menu"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
