//! Integration tests for a full playthrough through the engine facade.

mod common;

use std::sync::Arc;

use papergal_content::domain::scene::DialogLine;
use papergal_core::error::DomainError;
use papergal_core::mode::{Audience, Guide};
use papergal_engine::EngineError;
use papergal_narrative::application::query_handlers::{SceneBody, ScreenView};
use papergal_narrative::domain::aggregates::Screen;
use papergal_narrative::domain::transition::{AdvanceOutcome, StayReason};
use papergal_save_store::in_memory_save_repository::InMemorySaveRepository;
use papergal_test_support::FailingSaveRepository;

fn informed() -> Audience {
    Audience::new("informed")
}

fn senpai() -> Guide {
    Guide::new("senpai")
}

#[tokio::test]
async fn test_two_scene_playthrough_persists_final_scene() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let document = r#"{ "scenes": [
        { "id": "a", "kind": "dialog", "next": "b" },
        { "id": "b", "kind": "ending" }
    ] }"#;
    let mut engine = common::boot_engine(document, dir.path()).await;

    // Act
    engine.start_playthrough(informed(), senpai()).unwrap();
    engine.advance().unwrap();
    let last = engine.advance().unwrap();

    // Assert
    assert_eq!(
        last.outcome,
        AdvanceOutcome::Stayed {
            reason: StayReason::Terminal
        }
    );
    assert_eq!(engine.playthrough_view().scene_id, "b");

    let saved: serde_json::Value =
        serde_json::from_str(&engine.inspect_save().unwrap()).unwrap();
    assert_eq!(saved["sceneId"], "b");
}

#[tokio::test]
async fn test_full_playthrough_with_quiz_reaches_ending() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut engine = common::boot_engine(common::DEMO_CONTENT, dir.path()).await;

    // Act / Assert: menu first.
    assert_eq!(engine.render(), ScreenView::Menu);

    engine.start_playthrough(informed(), senpai()).unwrap();
    let ScreenView::Scene(first) = engine.render() else {
        panic!("expected scene view");
    };
    assert_eq!(first.chapter, "Prologue");
    assert_eq!(first.mode_label, "Informed · Senpai");
    assert_eq!(
        first.body,
        SceneBody::Dialog {
            line: DialogLine::new("Senpai", "Welcome back."),
        }
    );

    engine.advance().unwrap();
    engine.advance().unwrap();

    // The quiz blocks until answered.
    let blocked = engine.advance().unwrap();
    assert_eq!(
        blocked.outcome,
        AdvanceOutcome::Stayed {
            reason: StayReason::AnswerRequired
        }
    );

    let feedback = engine.answer_option("attn").unwrap().outcome;
    assert!(feedback.correct);
    assert_eq!(feedback.feedback, "Exactly.");

    // `q1` has no `next`, so the ending scene is used.
    let moved = engine.advance().unwrap();
    assert_eq!(
        moved.outcome,
        AdvanceOutcome::Entered {
            scene_id: "ending".to_owned()
        }
    );

    let ScreenView::Scene(ending) = engine.render() else {
        panic!("expected scene view");
    };
    assert_eq!(
        ending.body,
        SceneBody::Ending {
            line: DialogLine::new("Senpai", "That's a wrap."),
            cta_text: "Read the paper".to_owned(),
            redirect_url: Some("https://example.org/paper".to_owned()),
        }
    );
    assert_eq!(engine.exit_destination(), Some("https://example.org/paper"));

    let view = engine.playthrough_view();
    assert_eq!(view.answered, 1);
    assert_eq!(view.correct, 1);
}

#[tokio::test]
async fn test_resume_in_new_engine_restores_progress() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut first = common::boot_engine(common::DEMO_CONTENT, dir.path()).await;
    first.start_playthrough(Audience::new("lay"), senpai()).unwrap();
    first.advance().unwrap();
    first.advance().unwrap();
    first.answer_option("conv").unwrap();

    let mut second = common::boot_engine(common::DEMO_CONTENT, dir.path()).await;

    // Act
    second.resume_playthrough().unwrap();

    // Assert
    let view = second.playthrough_view();
    assert_eq!(view.audience, Audience::new("lay"));
    assert_eq!(view.scene_id, "q1");
    assert_eq!(view.screen, Screen::Scene);
    assert_eq!(view.answered, 1);
    assert_eq!(view.correct, 0);

    let ScreenView::Scene(scene) = second.render() else {
        panic!("expected scene view");
    };
    let SceneBody::Quiz { prompt, answer, .. } = scene.body else {
        panic!("expected quiz body");
    };
    assert_eq!(prompt, "What is new?");
    assert_eq!(answer.unwrap().feedback, "Not this time.");
}

#[tokio::test]
async fn test_resume_without_save_leaves_menu_and_reports_error() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut engine = common::boot_engine(common::DEMO_CONTENT, dir.path()).await;

    // Act
    let result = engine.resume_playthrough();

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Domain(DomainError::RestoreUnavailable)
    ));
    assert!(err.is_recoverable());
    assert_eq!(engine.render(), ScreenView::Menu);
}

#[tokio::test]
async fn test_resume_ignores_corrupt_save() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let repo = common::save_repository(dir.path());
    std::fs::write(
        dir.path().join("paper2galgame.save.v1.json"),
        b"not json at all",
    )
    .unwrap();
    let mut engine = common::boot_engine_with(common::DEMO_CONTENT, repo).await;

    // Act
    let result = engine.resume_playthrough();

    // Assert
    assert!(matches!(
        result,
        Err(EngineError::Domain(DomainError::RestoreUnavailable))
    ));
}

#[tokio::test]
async fn test_resume_ignores_corrupt_in_memory_save() {
    // Arrange
    let saves = Arc::new(InMemorySaveRepository::with_raw("not json at all"));
    let mut engine = common::boot_engine_with(common::DEMO_CONTENT, saves.clone()).await;

    // Act
    let result = engine.resume_playthrough();

    // Assert
    assert!(matches!(
        result,
        Err(EngineError::Domain(DomainError::RestoreUnavailable))
    ));
    assert_eq!(engine.render(), ScreenView::Menu);
    assert!(engine.inspect_save().is_none());
}

#[tokio::test]
async fn test_in_memory_saves_carry_progress_between_engines() {
    // Arrange
    let saves = Arc::new(InMemorySaveRepository::new());
    let mut first = common::boot_engine_with(common::DEMO_CONTENT, saves.clone()).await;
    first.start_playthrough(informed(), senpai()).unwrap();
    first.advance().unwrap();

    let mut second = common::boot_engine_with(common::DEMO_CONTENT, saves.clone()).await;

    // Act
    second.resume_playthrough().unwrap();

    // Assert
    assert_eq!(second.playthrough_view().scene_id, "b");
    let raw: serde_json::Value = serde_json::from_str(&saves.raw().unwrap()).unwrap();
    assert_eq!(raw["sceneId"], "b");
}

#[tokio::test]
async fn test_reset_then_resume_is_unavailable() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut engine = common::boot_engine(common::DEMO_CONTENT, dir.path()).await;
    engine.start_playthrough(informed(), senpai()).unwrap();
    engine.advance().unwrap();

    // Act
    let reset = engine.reset_playthrough();
    let resumed = engine.resume_playthrough();

    // Assert
    assert!(reset.persistence_warning.is_none());
    assert!(engine.inspect_save().is_none());
    assert!(matches!(
        resumed,
        Err(EngineError::Domain(DomainError::RestoreUnavailable))
    ));
    assert_eq!(engine.render(), ScreenView::Menu);
}

#[tokio::test]
async fn test_return_to_menu_keeps_save_for_resume() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut engine = common::boot_engine(common::DEMO_CONTENT, dir.path()).await;
    engine.start_playthrough(informed(), senpai()).unwrap();
    engine.advance().unwrap();

    // Act
    engine.return_to_menu();
    let on_menu = engine.render();
    engine.resume_playthrough().unwrap();

    // Assert
    assert_eq!(on_menu, ScreenView::Menu);
    assert_eq!(engine.playthrough_view().scene_id, "b");
}

#[tokio::test]
async fn test_actions_before_start_are_rejected() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut engine = common::boot_engine(common::DEMO_CONTENT, dir.path()).await;

    // Act
    let advanced = engine.advance();
    let answered = engine.answer_option("attn");

    // Assert
    assert!(matches!(
        advanced,
        Err(EngineError::Domain(DomainError::NoActivePlaythrough))
    ));
    assert!(matches!(
        answered,
        Err(EngineError::Domain(DomainError::NoActivePlaythrough))
    ));
}

#[tokio::test]
async fn test_start_with_unknown_guide_is_rejected() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut engine = common::boot_engine(common::DEMO_CONTENT, dir.path()).await;

    // Act
    let result = engine.start_playthrough(informed(), Guide::new("kouhai"));

    // Assert
    assert!(matches!(
        result,
        Err(EngineError::Domain(DomainError::Validation(_)))
    ));
    assert!(engine.inspect_save().is_none());
}

#[tokio::test]
async fn test_dangling_next_renders_error_state() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let document = r#"{ "scenes": [
        { "id": "a", "kind": "dialog", "next": "missing" }
    ] }"#;
    let mut engine = common::boot_engine(document, dir.path()).await;
    engine.start_playthrough(informed(), senpai()).unwrap();

    // Act
    engine.advance().unwrap();
    let view = engine.render();
    let stuck = engine.advance();

    // Assert
    assert_eq!(
        view,
        ScreenView::Error {
            diagnostic: "scene not found: missing".to_owned(),
        }
    );
    assert!(matches!(
        stuck,
        Err(EngineError::Domain(DomainError::UnknownScene(_)))
    ));
}

#[tokio::test]
async fn test_unknown_scene_kind_renders_error_state() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let document = r#"{ "scenes": [ { "id": "a", "kind": "cutscene" } ] }"#;
    let mut engine = common::boot_engine(document, dir.path()).await;

    // Act
    engine.start_playthrough(informed(), senpai()).unwrap();

    // Assert
    let ScreenView::Error { diagnostic } = engine.render() else {
        panic!("expected error view");
    };
    assert!(diagnostic.contains("cutscene"));
}

#[tokio::test]
async fn test_scene_without_kind_loads_and_renders_error_state() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let document = r#"{ "scenes": [
        { "id": "a", "kind": "dialog", "next": "b" },
        { "id": "b" }
    ] }"#;
    let mut engine = common::boot_engine(document, dir.path()).await;
    engine.start_playthrough(informed(), senpai()).unwrap();

    // Act
    engine.advance().unwrap();
    let view = engine.render();

    // Assert
    assert_eq!(
        view,
        ScreenView::Error {
            diagnostic: "unknown scene kind `` on scene b".to_owned(),
        }
    );
}

#[tokio::test]
async fn test_null_variants_fall_back_instead_of_failing_boot() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let document = r#"{ "scenes": [
        {
            "id": "q1", "kind": "quiz", "next": "end", "lines": null,
            "prompt": { "informed": null, "lay": "Pick one" },
            "options": [
                { "id": "x", "text": { "informed": null, "lay": "Yes" }, "feedback": null, "correct": null }
            ]
        },
        { "id": "end", "kind": "ending", "lines": { "informed": null } }
    ] }"#;
    let mut engine = common::boot_engine(document, dir.path()).await;

    // Act
    engine.start_playthrough(informed(), senpai()).unwrap();
    let quiz = engine.render();
    let answered = engine.answer_option("x").unwrap().outcome;
    engine.advance().unwrap();
    let ending = engine.render();

    // Assert
    let ScreenView::Scene(quiz) = quiz else {
        panic!("expected scene view");
    };
    let SceneBody::Quiz { prompt, options, .. } = quiz.body else {
        panic!("expected quiz body");
    };
    assert_eq!(prompt, "Pick one");
    assert_eq!(options[0].text, "Yes");
    assert!(!answered.correct);

    let ScreenView::Scene(ending) = ending else {
        panic!("expected scene view");
    };
    assert!(matches!(ending.body, SceneBody::Ending { .. }));
}

#[tokio::test]
async fn test_failed_save_is_reported_but_transition_kept() {
    // Arrange
    let mut engine =
        common::boot_engine_with(common::DEMO_CONTENT, Arc::new(FailingSaveRepository)).await;

    // Act
    let started = engine.start_playthrough(informed(), senpai()).unwrap();
    let advanced = engine.advance().unwrap();

    // Assert
    assert!(started.persistence_warning.is_some());
    assert!(advanced.persistence_warning.is_some());
    assert_eq!(engine.playthrough_view().scene_id, "b");
}
