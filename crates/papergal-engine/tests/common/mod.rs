//! Shared test helpers for engine integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use papergal_content::application::loader::StaticContentSource;
use papergal_core::clock::Clock;
use papergal_core::save::SaveRepository;
use papergal_engine::{Engine, EngineConfig};
use papergal_save_store::file_save_repository::FileSaveRepository;
use papergal_test_support::FixedClock;

/// A short playthrough: two dialogs, a quiz, and an ending.
pub const DEMO_CONTENT: &str = r#"{
    "labels": {
        "audiences": { "lay": "Newcomer", "informed": "Informed", "expert": "Expert" },
        "guides": { "senpai": "Senpai" }
    },
    "meta": {
        "title": "Attention Is All You Need",
        "endCtaText": { "lay": "Back to the start", "informed": "Read the paper" },
        "redirectUrl": "https://example.org/paper"
    },
    "scenes": [
        {
            "id": "a", "kind": "dialog", "chapter": "Prologue", "next": "b",
            "lines": {
                "informed": { "senpai": { "speaker": "Senpai", "text": "Welcome back." } },
                "lay": { "senpai": { "speaker": "Senpai", "text": "Hi there!" } }
            }
        },
        {
            "id": "b", "kind": "dialog", "next": "q1",
            "lines": {
                "informed": { "senpai": { "speaker": "Senpai", "text": "Quick check." } }
            }
        },
        {
            "id": "q1", "kind": "quiz", "chapter": "Checkpoint",
            "prompt": { "informed": "What replaces recurrence?", "lay": "What is new?" },
            "options": [
                { "id": "attn", "text": "Attention", "feedback": { "informed": "Exactly." }, "correct": true },
                { "id": "conv", "text": "Convolution", "feedback": "Not this time." }
            ]
        },
        {
            "id": "ending", "kind": "ending",
            "lines": { "informed": { "senpai": { "speaker": "Senpai", "text": "That's a wrap." } } }
        }
    ]
}"#;

/// Fixed clock used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::default())
}

/// Save repository writing into `dir`.
pub fn save_repository(dir: &Path) -> Arc<dyn SaveRepository> {
    Arc::new(FileSaveRepository::in_dir(dir))
}

/// Boots an engine over `document` with saves kept in `dir`.
pub async fn boot_engine(document: &str, dir: &Path) -> Engine {
    boot_engine_with(document, save_repository(dir)).await
}

/// Boots an engine over `document` with the given save repository.
pub async fn boot_engine_with(document: &str, saves: Arc<dyn SaveRepository>) -> Engine {
    let source = StaticContentSource::json("test-content.json", document);
    let config = EngineConfig::new("test-content.json");
    Engine::boot_from(&source, &config, saves, fixed_clock())
        .await
        .unwrap()
}
