//! Scene graph data model.
//!
//! These types mirror the content document one-to-one. They are immutable
//! once loaded; choosing which variant to show is the narrative crate's job.
//!
//! Gaps in the document never fail the load. A `null` where a value is
//! expected reads as if the key were absent, so the fallback chains and the
//! unknown-kind diagnostic handle it when the scene is shown.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use papergal_core::mode::{Audience, Guide};
use serde::{Deserialize, Deserializer, Serialize};

/// Scene variant tag.
///
/// Unrecognized tags are kept as `Other` so a document with a typo still
/// loads; the narrative layer reports them when the scene is reached. A
/// missing tag is `Other("")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SceneKind {
    /// A single line from the guide.
    Dialog,
    /// A prompt with selectable options.
    Quiz,
    /// The terminal scene of a playthrough.
    Ending,
    /// Any other tag.
    Other(String),
}

impl SceneKind {
    /// Returns the tag as written in content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Dialog => "dialog",
            Self::Quiz => "quiz",
            Self::Ending => "ending",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for SceneKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "dialog" => Self::Dialog,
            "quiz" => Self::Quiz,
            "ending" => Self::Ending,
            _ => Self::Other(raw),
        }
    }
}

impl From<SceneKind> for String {
    fn from(kind: SceneKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl Default for SceneKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One spoken line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogLine {
    /// Display name of the speaker.
    #[serde(default, deserialize_with = "null_as_default")]
    pub speaker: String,
    /// The line itself.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

impl DialogLine {
    /// Creates a line.
    #[must_use]
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Lines keyed by audience, then by guide.
pub type LineTable = HashMap<Audience, HashMap<Guide, DialogLine>>;

/// Text that is either audience-agnostic or varies per audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// The same text for every audience.
    Plain(String),
    /// One variant per audience.
    PerAudience(HashMap<Audience, String>),
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            PerAudience(HashMap<Audience, Option<String>>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Plain(text) => Self::Plain(text),
            Raw::PerAudience(variants) => Self::PerAudience(drop_nulls(variants)),
        })
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::PerAudience(HashMap::new())
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_owned())
    }
}

/// A selectable answer in a quiz scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Identifier recorded when the option is chosen.
    pub id: String,
    /// Button text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: LocalizedText,
    /// Explanation shown after choosing.
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: LocalizedText,
    /// Whether this is a right answer.
    #[serde(default, deserialize_with = "null_as_default")]
    pub correct: bool,
}

/// Call-to-action attached to an ending scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    /// Button text.
    #[serde(default)]
    pub text: Option<LocalizedText>,
}

/// One node in the scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique key within the document.
    pub id: String,
    /// Variant tag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: SceneKind,
    /// Chapter label, passed through to the presentation layer.
    #[serde(default)]
    pub chapter: Option<String>,
    /// Successor scene for dialog and quiz kinds.
    #[serde(default)]
    pub next: Option<String>,
    /// Dialog and ending lines.
    #[serde(default, deserialize_with = "line_table")]
    pub lines: LineTable,
    /// Quiz prompt per audience.
    #[serde(default, deserialize_with = "sparse_map")]
    pub prompt: HashMap<Audience, String>,
    /// Quiz options in display order.
    #[serde(default, deserialize_with = "sparse_list")]
    pub options: Vec<QuizOption>,
    /// Ending call-to-action.
    #[serde(default)]
    pub cta: Option<CallToAction>,
}

impl Scene {
    /// Returns the option with the given id.
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    /// Returns `next` unless it is missing or empty.
    #[must_use]
    pub fn successor(&self) -> Option<&str> {
        self.next.as_deref().filter(|id| !id.is_empty())
    }
}

/// Human-readable names for audience and guide identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Audience id → display label.
    #[serde(default, deserialize_with = "sparse_map")]
    pub audiences: HashMap<Audience, String>,
    /// Guide id → display label.
    #[serde(default, deserialize_with = "sparse_map")]
    pub guides: HashMap<Guide, String>,
}

/// Document-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Title of the piece.
    #[serde(default)]
    pub title: Option<String>,
    /// Default call-to-action text for endings without their own.
    #[serde(default)]
    pub end_cta_text: Option<LocalizedText>,
    /// Where the ending call-to-action leads.
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// The whole content document as written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Scenes in load order; the first is the playthrough entry point.
    #[serde(default, deserialize_with = "null_as_default")]
    pub scenes: Vec<Scene>,
    /// Label lookup tables.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Labels,
    /// Document-wide settings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Meta,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn drop_nulls<K: Eq + Hash, V>(entries: HashMap<K, Option<V>>) -> HashMap<K, V> {
    entries
        .into_iter()
        .filter_map(|(key, value)| Some((key, value?)))
        .collect()
}

fn sparse_map<'de, D, K, V>(deserializer: D) -> Result<HashMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Eq + Hash + Deserialize<'de>,
    V: Deserialize<'de>,
{
    let entries: Option<HashMap<K, Option<V>>> = Option::deserialize(deserializer)?;
    Ok(drop_nulls(entries.unwrap_or_default()))
}

fn sparse_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

fn line_table<'de, D>(deserializer: D) -> Result<LineTable, D::Error>
where
    D: Deserializer<'de>,
{
    let table: Option<HashMap<Audience, Option<HashMap<Guide, Option<DialogLine>>>>> =
        Option::deserialize(deserializer)?;
    Ok(drop_nulls(table.unwrap_or_default())
        .into_iter()
        .map(|(audience, by_guide)| (audience, drop_nulls(by_guide)))
        .collect())
}
