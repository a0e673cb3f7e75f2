//! Directory-backed artifact store
//!
//! Every artifact is a single file directly inside the root directory, named
//! by its [`ArtifactId`]. Paths are only ever built from ids, never from
//! caller input.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::ArtifactStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{ArtifactId, AudioArtifact};
use tokio::fs;
use tracing::{debug, instrument, warn};

/// Artifact store keeping files in a local directory
#[derive(Debug, Clone)]
pub struct FilesystemArtifactStore {
    root: PathBuf,
}

impl FilesystemArtifactStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, ApplicationError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            ApplicationError::Storage(format!(
                "Failed to create artifact directory {}: {e}",
                root.display()
            ))
        })?;
        debug!(root = %root.display(), "Opened artifact directory");
        Ok(Self { root })
    }

    /// The directory artifacts are stored in
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: ArtifactId) -> PathBuf {
        self.root.join(id.file_name())
    }

    fn staging_path_for(&self, id: ArtifactId) -> PathBuf {
        self.root.join(format!(".{}.part", id.file_name()))
    }
}

fn storage_error(action: &str, id: ArtifactId, err: &std::io::Error) -> ApplicationError {
    ApplicationError::Storage(format!("Failed to {action} {id}: {err}"))
}

#[async_trait]
impl ArtifactStore for FilesystemArtifactStore {
    #[instrument(skip(self, data), fields(artifact = %id, size = data.len()))]
    async fn put(&self, id: ArtifactId, data: Vec<u8>) -> Result<AudioArtifact, ApplicationError> {
        let path = self.path_for(id);
        let staging = self.staging_path_for(id);
        let size = data.len() as u64;

        // Readers only ever see complete files.
        let committed = match fs::write(&staging, data).await {
            Ok(()) => fs::rename(&staging, &path)
                .await
                .map_err(|e| storage_error("commit", id, &e)),
            Err(e) => Err(storage_error("write", id, &e)),
        };
        if let Err(e) = committed {
            match fs::remove_file(&staging).await {
                Ok(()) => {},
                Err(cleanup) if cleanup.kind() == ErrorKind::NotFound => {},
                Err(cleanup) => {
                    warn!(artifact = %id, error = %cleanup, "Failed to remove partial artifact");
                },
            }
            return Err(e);
        }

        Ok(AudioArtifact::new(id, path.display().to_string(), size))
    }

    #[instrument(skip(self), fields(artifact = %id))]
    async fn get(&self, id: ArtifactId) -> Result<Vec<u8>, ApplicationError> {
        match fs::read(self.path_for(id)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ApplicationError::NotFound(id.file_name()))
            },
            Err(e) => Err(storage_error("read", id, &e)),
        }
    }

    #[instrument(skip(self), fields(artifact = %id))]
    async fn delete(&self, id: ArtifactId) -> Result<bool, ApplicationError> {
        match fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(storage_error("delete", id, &e)),
        }
    }

    #[instrument(skip(self))]
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, ApplicationError> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|e| {
            ApplicationError::Storage(format!("Failed to list {}: {e}", self.root.display()))
        })?;

        let mut purged = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ApplicationError::Storage(format!("Failed to list artifacts: {e}")))?
        {
            let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| ArtifactId::parse(name).ok())
            else {
                continue;
            };

            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => DateTime::<Utc>::from(modified),
                Err(e) => {
                    warn!(artifact = %id, error = %e, "Skipping artifact without timestamp");
                    continue;
                },
            };

            if modified < cutoff {
                match self.delete(id).await {
                    Ok(true) => purged += 1,
                    Ok(false) => {},
                    Err(e) => warn!(artifact = %id, error = %e, "Failed to purge artifact"),
                }
            }
        }

        Ok(purged)
    }

    async fn is_available(&self) -> bool {
        fs::metadata(&self.root)
            .await
            .is_ok_and(|m| m.is_dir() && !m.permissions().readonly())
    }
}
