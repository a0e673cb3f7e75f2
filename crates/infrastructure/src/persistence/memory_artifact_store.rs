//! In-memory artifact store
//!
//! Holds artifacts in process memory. Used in tests and for deployments
//! without a writable disk; contents are lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ArtifactStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{ArtifactId, AudioArtifact};
use parking_lot::RwLock;

#[derive(Debug)]
struct StoredArtifact {
    artifact: AudioArtifact,
    data: Vec<u8>,
}

/// Artifact store backed by a map in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactStore {
    artifacts: Arc<RwLock<HashMap<ArtifactId, StoredArtifact>>>,
}

impl InMemoryArtifactStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.read().is_empty()
    }

    /// Ids of all stored artifacts
    #[must_use]
    pub fn ids(&self) -> Vec<ArtifactId> {
        self.artifacts.read().keys().copied().collect()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn put(&self, id: ArtifactId, data: Vec<u8>) -> Result<AudioArtifact, ApplicationError> {
        let artifact = AudioArtifact::new(id, format!("memory://{id}"), data.len() as u64);
        self.artifacts.write().insert(
            id,
            StoredArtifact {
                artifact: artifact.clone(),
                data,
            },
        );
        Ok(artifact)
    }

    async fn get(&self, id: ArtifactId) -> Result<Vec<u8>, ApplicationError> {
        self.artifacts
            .read()
            .get(&id)
            .map(|stored| stored.data.clone())
            .ok_or_else(|| ApplicationError::NotFound(id.file_name()))
    }

    async fn delete(&self, id: ArtifactId) -> Result<bool, ApplicationError> {
        Ok(self.artifacts.write().remove(&id).is_some())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, ApplicationError> {
        let mut artifacts = self.artifacts.write();
        let before = artifacts.len();
        artifacts.retain(|_, stored| stored.artifact.created_at >= cutoff);
        Ok(before - artifacts.len())
    }

    async fn is_available(&self) -> bool {
        true
    }
}
