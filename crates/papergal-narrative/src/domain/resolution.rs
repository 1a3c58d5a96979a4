//! Content resolution.
//!
//! Pure functions that pick the variant of a scene's content to show. When
//! the exact variant is missing they walk a fixed fallback chain rather than
//! failing: malformed content degrades to some text, never to an error.

use std::collections::HashMap;

use papergal_content::domain::scene::{DialogLine, Labels, LocalizedText, Meta, Scene};
use papergal_core::mode::{Audience, EXPERT, Guide, INFORMED, LAY, SENPAI};

/// Audiences tried, in order, after the requested one.
pub const FALLBACK_AUDIENCES: [&str; 3] = [INFORMED, EXPERT, LAY];

/// Guide used for every dialog fallback.
pub const FALLBACK_GUIDE: &str = SENPAI;

/// Speaker of the sentinel line.
pub const MISSING_SPEAKER: &str = "Guide";

/// Text of the sentinel line.
pub const MISSING_TEXT: &str = "[Missing text]";

/// Call-to-action text when neither the scene nor the document sets one.
pub const DEFAULT_CTA_TEXT: &str = "Continue";

/// Chapter label for scenes without one.
pub const DEFAULT_CHAPTER: &str = "Chapter";

/// Picks the line for `(audience, guide)`.
///
/// Order: exact pair, then `(informed, senpai)`, `(expert, senpai)`,
/// `(lay, senpai)`, then the sentinel line. The fallback pairs do not depend
/// on the requested audience.
#[must_use]
pub fn resolve_dialog_line(scene: &Scene, audience: &Audience, guide: &Guide) -> DialogLine {
    line_at(scene, audience.as_str(), guide.as_str())
        .or_else(|| {
            FALLBACK_AUDIENCES
                .iter()
                .find_map(|fallback| line_at(scene, fallback, FALLBACK_GUIDE))
        })
        .cloned()
        .unwrap_or_else(|| DialogLine::new(MISSING_SPEAKER, MISSING_TEXT))
}

fn line_at<'a>(scene: &'a Scene, audience: &str, guide: &str) -> Option<&'a DialogLine> {
    scene.lines.get(audience)?.get(guide)
}

/// Picks the quiz prompt: requested audience, then `informed`, `expert`,
/// `lay`, then the empty string.
#[must_use]
pub fn resolve_prompt(scene: &Scene, audience: &Audience) -> String {
    per_audience(&scene.prompt, audience).to_owned()
}

/// Resolves text that may or may not vary by audience.
///
/// Plain strings are returned unchanged; mappings use the same chain as
/// [`resolve_prompt`].
#[must_use]
pub fn resolve_localized_text(value: &LocalizedText, audience: &Audience) -> String {
    match value {
        LocalizedText::Plain(text) => text.clone(),
        LocalizedText::PerAudience(variants) => per_audience(variants, audience).to_owned(),
    }
}

fn per_audience<'a>(variants: &'a HashMap<Audience, String>, audience: &Audience) -> &'a str {
    std::iter::once(audience.as_str())
        .chain(FALLBACK_AUDIENCES)
        .find_map(|candidate| variants.get(candidate))
        .map_or("", String::as_str)
}

/// Picks the ending call-to-action: the scene's own text, then the
/// document default, then [`DEFAULT_CTA_TEXT`].
#[must_use]
pub fn resolve_cta_text(scene: &Scene, meta: &Meta, audience: &Audience) -> String {
    scene
        .cta
        .as_ref()
        .and_then(|cta| cta.text.as_ref())
        .filter(|text| !is_blank(text))
        .or_else(|| meta.end_cta_text.as_ref().filter(|text| !is_blank(text)))
        .map_or_else(
            || DEFAULT_CTA_TEXT.to_owned(),
            |text| resolve_localized_text(text, audience),
        )
}

fn is_blank(text: &LocalizedText) -> bool {
    matches!(text, LocalizedText::Plain(plain) if plain.is_empty())
}

/// Builds the `"<audience> · <guide>"` chip, using configured labels where
/// present and the raw identifiers otherwise.
#[must_use]
pub fn mode_label(audience: &Audience, guide: &Guide, labels: &Labels) -> String {
    let audience_label = labels
        .audiences
        .get(audience)
        .map_or(audience.as_str(), String::as_str);
    let guide_label = labels
        .guides
        .get(guide)
        .map_or(guide.as_str(), String::as_str);
    format!("{audience_label} · {guide_label}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use papergal_content::domain::scene::CallToAction;

    fn scene(value: serde_json::Value) -> Scene {
        serde_json::from_value(value).unwrap()
    }

    fn audience(id: &str) -> Audience {
        Audience::new(id)
    }

    fn guide(id: &str) -> Guide {
        Guide::new(id)
    }

    fn line(speaker: &str, text: &str) -> serde_json::Value {
        serde_json::json!({ "speaker": speaker, "text": text })
    }

    #[test]
    fn test_resolve_dialog_line_returns_exact_variant() {
        // Arrange
        let s = scene(serde_json::json!({
            "id": "a", "kind": "dialog",
            "lines": {
                "lay": { "kouhai": line("K", "exact") },
                "informed": { "senpai": line("S", "fallback") }
            }
        }));

        // Act
        let resolved = resolve_dialog_line(&s, &audience("lay"), &guide("kouhai"));

        // Assert
        assert_eq!(resolved, DialogLine::new("K", "exact"));
    }

    #[test]
    fn test_resolve_dialog_line_prefers_informed_senpai_first() {
        // Arrange
        let s = scene(serde_json::json!({
            "id": "a", "kind": "dialog",
            "lines": {
                "lay": { "senpai": line("S", "lay") },
                "expert": { "senpai": line("S", "expert") },
                "informed": { "senpai": line("S", "informed") }
            }
        }));

        // Act
        let resolved = resolve_dialog_line(&s, &audience("lay"), &guide("kouhai"));

        // Assert
        assert_eq!(resolved.text, "informed");
    }

    #[test]
    fn test_resolve_dialog_line_uses_expert_senpai_when_only_that_exists() {
        // Arrange
        let s = scene(serde_json::json!({
            "id": "a", "kind": "dialog",
            "lines": { "expert": { "senpai": line("Senpai", "deep dive") } }
        }));

        // Act
        let resolved = resolve_dialog_line(&s, &audience("lay"), &guide("guideX"));

        // Assert
        assert_eq!(resolved, DialogLine::new("Senpai", "deep dive"));
    }

    #[test]
    fn test_resolve_dialog_line_prefers_expert_over_lay_fallback() {
        // Arrange
        let s = scene(serde_json::json!({
            "id": "a", "kind": "dialog",
            "lines": {
                "lay": { "senpai": line("S", "lay") },
                "expert": { "senpai": line("S", "expert") }
            }
        }));

        // Act
        let resolved = resolve_dialog_line(&s, &audience("informed"), &guide("kouhai"));

        // Assert
        assert_eq!(resolved.text, "expert");
    }

    #[test]
    fn test_resolve_dialog_line_ignores_non_senpai_guides_in_fallback() {
        // Arrange
        let s = scene(serde_json::json!({
            "id": "a", "kind": "dialog",
            "lines": {
                "informed": { "kouhai": line("K", "wrong guide") },
                "lay": { "senpai": line("S", "lay senpai") }
            }
        }));

        // Act
        let resolved = resolve_dialog_line(&s, &audience("expert"), &guide("sensei"));

        // Assert
        assert_eq!(resolved.text, "lay senpai");
    }

    #[test]
    fn test_resolve_dialog_line_returns_sentinel_when_nothing_matches() {
        // Arrange
        let s = scene(serde_json::json!({ "id": "a", "kind": "dialog" }));

        // Act
        let resolved = resolve_dialog_line(&s, &audience("lay"), &guide("senpai"));

        // Assert
        assert_eq!(resolved, DialogLine::new("Guide", "[Missing text]"));
    }

    #[test]
    fn test_resolve_dialog_line_always_yields_a_line_for_every_mode_pair() {
        // Arrange
        let scenes = [
            scene(serde_json::json!({ "id": "d", "kind": "dialog" })),
            scene(serde_json::json!({
                "id": "e", "kind": "ending",
                "lines": { "lay": { "kouhai": line("K", "only") } }
            })),
        ];

        // Act / Assert
        for s in &scenes {
            for a in ["lay", "informed", "expert", "other"] {
                for g in ["senpai", "kouhai", "other"] {
                    let resolved = resolve_dialog_line(s, &audience(a), &guide(g));
                    assert!(!resolved.speaker.is_empty());
                    assert!(!resolved.text.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_resolve_prompt_walks_fallback_chain() {
        // Arrange
        let s = scene(serde_json::json!({
            "id": "q", "kind": "quiz",
            "prompt": { "lay": "lay prompt", "expert": "expert prompt" }
        }));

        // Act / Assert
        assert_eq!(resolve_prompt(&s, &audience("lay")), "lay prompt");
        assert_eq!(resolve_prompt(&s, &audience("informed")), "expert prompt");
        assert_eq!(resolve_prompt(&s, &audience("student")), "expert prompt");
    }

    #[test]
    fn test_resolve_prompt_defaults_to_empty_string() {
        let s = scene(serde_json::json!({ "id": "q", "kind": "quiz" }));

        assert_eq!(resolve_prompt(&s, &audience("lay")), "");
    }

    #[test]
    fn test_resolve_localized_text_returns_plain_strings_unchanged() {
        let value = LocalizedText::from("same for everyone");

        assert_eq!(
            resolve_localized_text(&value, &audience("expert")),
            "same for everyone"
        );
    }

    #[test]
    fn test_resolve_localized_text_falls_back_to_lay_last() {
        // Arrange
        let value: LocalizedText =
            serde_json::from_value(serde_json::json!({ "lay": "simple" })).unwrap();

        // Act / Assert
        assert_eq!(resolve_localized_text(&value, &audience("expert")), "simple");
        assert_eq!(
            resolve_localized_text(&LocalizedText::default(), &audience("expert")),
            ""
        );
    }

    #[test]
    fn test_resolve_cta_text_prefers_scene_then_meta_then_default() {
        // Arrange
        let mut s = scene(serde_json::json!({ "id": "ending", "kind": "ending" }));
        let meta = Meta {
            end_cta_text: Some(LocalizedText::from("Read the paper")),
            ..Meta::default()
        };

        // Act / Assert
        assert_eq!(
            resolve_cta_text(&s, &Meta::default(), &audience("lay")),
            "Continue"
        );
        assert_eq!(resolve_cta_text(&s, &meta, &audience("lay")), "Read the paper");

        s.cta = Some(CallToAction {
            text: Some(LocalizedText::from("Download PDF")),
        });
        assert_eq!(resolve_cta_text(&s, &meta, &audience("lay")), "Download PDF");
    }

    #[test]
    fn test_mode_label_uses_labels_or_raw_ids() {
        // Arrange
        let mut labels = Labels::default();
        labels
            .audiences
            .insert(audience("lay"), "Newcomer".to_owned());

        // Act
        let label = mode_label(&audience("lay"), &guide("senpai"), &labels);

        // Assert
        assert_eq!(label, "Newcomer · senpai");
    }
}
