//! Content loading: fetch once, parse, hash, index.
//!
//! Fetching is the only asynchronous step in the engine. Everything after
//! `load` returns works on the immutable `ContentIndex`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use papergal_core::error::LoadError;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::domain::index::ContentIndex;
use crate::domain::scene::ContentDocument;

/// Serialization format of a content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl ContentFormat {
    /// Picks YAML for `.yaml`/`.yml` files and JSON for everything else.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Bytes fetched from a content source.
#[derive(Debug, Clone)]
pub struct RawContent {
    /// Where the bytes came from, for diagnostics.
    pub location: String,
    /// How to parse the bytes.
    pub format: ContentFormat,
    /// The document.
    pub bytes: Vec<u8>,
}

/// Read-only origin of the content document.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the raw document.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Unreachable` if the document cannot be read.
    async fn fetch(&self) -> Result<RawContent, LoadError>;
}

/// Content document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileContentSource {
    path: PathBuf,
}

impl FileContentSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    async fn fetch(&self) -> Result<RawContent, LoadError> {
        let location = self.path.display().to_string();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::Unreachable {
                location: location.clone(),
                reason: e.to_string(),
            })?;
        Ok(RawContent {
            location,
            format: ContentFormat::from_path(&self.path),
            bytes,
        })
    }
}

/// Content document held in memory, e.g. embedded with `include_str!`.
#[derive(Debug, Clone)]
pub struct StaticContentSource {
    raw: RawContent,
}

impl StaticContentSource {
    /// Creates a JSON source from a string.
    #[must_use]
    pub fn json(location: impl Into<String>, document: impl Into<String>) -> Self {
        Self::new(location, ContentFormat::Json, document.into().into_bytes())
    }

    /// Creates a source from raw bytes.
    #[must_use]
    pub fn new(location: impl Into<String>, format: ContentFormat, bytes: Vec<u8>) -> Self {
        Self {
            raw: RawContent {
                location: location.into(),
                format,
                bytes,
            },
        }
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch(&self) -> Result<RawContent, LoadError> {
        Ok(self.raw.clone())
    }
}

/// SHA-256 hex digest of a document.
#[must_use]
pub fn version_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Parses and indexes fetched content.
///
/// # Errors
///
/// Returns `LoadError::Malformed` if the bytes are not a valid document,
/// and the errors of [`ContentIndex::from_document`] otherwise.
pub fn parse(raw: &RawContent) -> Result<ContentIndex, LoadError> {
    let document: ContentDocument = match raw.format {
        ContentFormat::Json => serde_json::from_slice(&raw.bytes)
            .map_err(|e| LoadError::Malformed(format!("{}: {e}", raw.location)))?,
        ContentFormat::Yaml => serde_yaml::from_slice(&raw.bytes)
            .map_err(|e| LoadError::Malformed(format!("{}: {e}", raw.location)))?,
    };
    ContentIndex::from_document(document, version_hash(&raw.bytes))
}

/// Fetches and indexes the content document.
///
/// # Errors
///
/// Returns `LoadError` if the source is unreachable or the document is
/// malformed, empty, or has duplicate scene ids.
pub async fn load(source: &dyn ContentSource) -> Result<ContentIndex, LoadError> {
    let raw = source.fetch().await?;
    let index = parse(&raw)?;

    info!(
        location = %raw.location,
        scenes = index.scenes().len(),
        version_hash = %index.version_hash(),
        "content loaded"
    );
    for (scene_id, next) in index.dangling_links() {
        warn!(scene_id, next, "scene links to an unknown successor");
    }

    Ok(index)
}
