//! Host save mechanisms
//!
//! A [`SaveTarget`] is the surrounding environment's facility for turning an
//! in-memory [`Artifact`] into a user-visible file. The exporter hands each
//! artifact to exactly one target call and keeps nothing afterwards.

use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::artifact::Artifact;
use crate::error::SaveError;
use crate::hash::ContentHash;

/// Proof that an artifact was saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReceipt {
    /// Where the artifact ended up (path, or a host-specific label)
    pub location: String,
    /// Bytes written
    pub bytes: usize,
    /// Digest of the written payload
    pub digest: ContentHash,
}

impl SaveReceipt {
    /// Receipt for an artifact saved at `location`
    #[must_use]
    pub fn for_artifact(artifact: &Artifact, location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            bytes: artifact.len(),
            digest: *artifact.digest(),
        }
    }
}

/// A host facility that persists artifacts
///
/// Implementations must either save the whole artifact or report an error;
/// any transient resource they acquire must be released before returning.
#[cfg_attr(test, mockall::automock)]
pub trait SaveTarget {
    /// Persist one artifact
    ///
    /// # Errors
    /// Returns `SaveError` if the host is unavailable or refuses the write
    fn save(&self, artifact: &Artifact) -> Result<SaveReceipt, SaveError>;
}

impl<T: SaveTarget + ?Sized> SaveTarget for &T {
    fn save(&self, artifact: &Artifact) -> Result<SaveReceipt, SaveError> {
        (**self).save(artifact)
    }
}

impl<T: SaveTarget + ?Sized> SaveTarget for Box<T> {
    fn save(&self, artifact: &Artifact) -> Result<SaveReceipt, SaveError> {
        (**self).save(artifact)
    }
}

/// Saves artifacts as files in a directory
///
/// Each payload is staged in a temporary file inside the directory and then
/// renamed into place, so readers never observe a partial file. The staging
/// file is removed on every failure path.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectoryTarget {
    /// Target an existing directory, replacing files with the same name
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: true,
        }
    }

    /// Refuse to replace existing files
    #[inline]
    #[must_use]
    pub fn no_clobber(mut self) -> Self {
        self.overwrite = false;
        self
    }

    /// Target directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveTarget for DirectoryTarget {
    fn save(&self, artifact: &Artifact) -> Result<SaveReceipt, SaveError> {
        if !self.dir.is_dir() {
            return Err(SaveError::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        let path = self.dir.join(artifact.filename());

        let mut staged =
            NamedTempFile::new_in(&self.dir).map_err(|e| SaveError::io_error(&self.dir, e))?;
        staged
            .write_all(artifact.payload())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| SaveError::io_error(staged.path(), e))?;

        let persisted = if self.overwrite {
            staged.persist(&path)
        } else {
            staged.persist_noclobber(&path)
        };
        persisted.map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                SaveError::Rejected(format!("{} already exists", path.display()))
            } else {
                SaveError::io_error(&path, e.error)
            }
        })?;

        Ok(SaveReceipt::for_artifact(
            artifact,
            path.display().to_string(),
        ))
    }
}

/// Keeps saved artifacts in memory
///
/// Useful for embedding hosts that stream the payload themselves, and for
/// tests.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    saved: Mutex<Vec<Artifact>>,
    closed: Option<String>,
}

impl MemoryTarget {
    /// Create an empty target
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A target that refuses every save as unavailable
    #[must_use]
    pub fn closed(reason: impl Into<String>) -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            closed: Some(reason.into()),
        }
    }

    /// Snapshot of saved artifacts, in save order
    #[must_use]
    pub fn saved(&self) -> Vec<Artifact> {
        self.saved.lock().clone()
    }

    /// Remove and return saved artifacts
    #[must_use]
    pub fn take(&self) -> Vec<Artifact> {
        std::mem::take(&mut *self.saved.lock())
    }

    /// Number of saved artifacts
    #[must_use]
    pub fn len(&self) -> usize {
        self.saved.lock().len()
    }

    /// Check if nothing was saved
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saved.lock().is_empty()
    }
}

impl SaveTarget for MemoryTarget {
    fn save(&self, artifact: &Artifact) -> Result<SaveReceipt, SaveError> {
        if let Some(reason) = &self.closed {
            return Err(SaveError::Unavailable(reason.clone()));
        }
        let mut guard = self.saved.lock();
        guard.push(artifact.clone());
        Ok(SaveReceipt::for_artifact(
            artifact,
            format!("memory:{}#{}", artifact.filename(), guard.len() - 1),
        ))
    }
}
