//! The per-playthrough session record.

use std::collections::BTreeMap;

use papergal_core::mode::{Audience, Guide};
use serde::{Deserialize, Serialize};

/// The answer recorded for one quiz scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    /// The option the viewer picked.
    #[serde(alias = "chosen")]
    pub chosen_option_id: String,
    /// Whether that option is marked correct.
    #[serde(alias = "correct")]
    pub was_correct: bool,
}

/// Progress of one playthrough.
///
/// Audience and guide are fixed when the playthrough begins; there are no
/// setters. Quiz answers only grow or overwrite existing keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    audience: Audience,
    guide: Guide,
    scene_id: String,
    #[serde(default)]
    quiz_answers: BTreeMap<String, QuizAnswer>,
}

impl SessionState {
    /// The state before any playthrough: default modes, positioned at `entry`.
    #[must_use]
    pub fn initial(entry: impl Into<String>) -> Self {
        Self::begin(Audience::default(), Guide::default(), entry)
    }

    /// A fresh playthrough with no answers.
    #[must_use]
    pub fn begin(audience: Audience, guide: Guide, entry: impl Into<String>) -> Self {
        Self {
            audience,
            guide,
            scene_id: entry.into(),
            quiz_answers: BTreeMap::new(),
        }
    }

    /// The selected audience.
    #[must_use]
    pub fn audience(&self) -> &Audience {
        &self.audience
    }

    /// The selected guide.
    #[must_use]
    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    /// The current scene.
    #[must_use]
    pub fn scene_id(&self) -> &str {
        &self.scene_id
    }

    /// All recorded answers keyed by quiz scene id.
    #[must_use]
    pub fn quiz_answers(&self) -> &BTreeMap<String, QuizAnswer> {
        &self.quiz_answers
    }

    /// The answer recorded for a quiz scene.
    #[must_use]
    pub fn answer_for(&self, scene_id: &str) -> Option<&QuizAnswer> {
        self.quiz_answers.get(scene_id)
    }

    /// Moves to another scene.
    pub fn enter_scene(&mut self, scene_id: impl Into<String>) {
        self.scene_id = scene_id.into();
    }

    /// Records or overwrites the answer for a quiz scene.
    pub fn record_answer(&mut self, scene_id: impl Into<String>, answer: QuizAnswer) {
        self.quiz_answers.insert(scene_id.into(), answer);
    }

    /// Number of answers marked correct.
    #[must_use]
    pub fn correct_answers(&self) -> usize {
        self.quiz_answers.values().filter(|a| a.was_correct).count()
    }
}
