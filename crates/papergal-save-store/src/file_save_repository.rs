//! File-backed implementation of the `SaveRepository` trait.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use papergal_core::error::DomainError;
use papergal_core::save::SaveRepository;
use tracing::{debug, warn};

use crate::DEFAULT_SAVE_KEY;

/// Stores the snapshot as `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file first and are renamed into place, so
/// a failed write leaves the previous snapshot untouched.
#[derive(Debug, Clone)]
pub struct FileSaveRepository {
    path: PathBuf,
    staging_path: PathBuf,
}

impl FileSaveRepository {
    /// Creates a repository storing `key` inside `dir`. The directory is
    /// created on first save.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            path: dir.join(format!("{key}.json")),
            staging_path: dir.join(format!("{key}.json.tmp")),
        }
    }

    /// Creates a repository under [`DEFAULT_SAVE_KEY`].
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir, DEFAULT_SAVE_KEY)
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, snapshot: &serde_json::Value) -> Result<(), DomainError> {
        let bytes = serde_json::to_vec(snapshot)
            .map_err(|e| DomainError::Persistence(format!("failed to encode save: {e}")))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| persistence_error(parent, &e))?;
        }
        fs::write(&self.staging_path, bytes)
            .map_err(|e| persistence_error(&self.staging_path, &e))?;
        fs::rename(&self.staging_path, &self.path).map_err(|e| persistence_error(&self.path, &e))
    }
}

fn persistence_error(path: &Path, error: &std::io::Error) -> DomainError {
    DomainError::Persistence(format!("{}: {error}", path.display()))
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, snapshot: &serde_json::Value) -> Result<(), DomainError> {
        self.write(snapshot)?;
        debug!(path = %self.path.display(), "saved playthrough");
        Ok(())
    }

    fn load(&self) -> Option<serde_json::Value> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read save");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt save");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "cleared save");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(persistence_error(&self.path, &e)),
        }
    }
}
