//! Artifact store port - Storage for generated audio and staged uploads

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{ArtifactId, AudioArtifact};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for audio artifact storage
///
/// Artifacts are addressed only by [`ArtifactId`], so implementations never
/// see caller-controlled paths.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store `data` under `id` and return the stored artifact record
    async fn put(&self, id: ArtifactId, data: Vec<u8>) -> Result<AudioArtifact, ApplicationError>;

    /// Read an artifact's bytes
    ///
    /// Returns `ApplicationError::NotFound` if nothing is stored under `id`.
    async fn get(&self, id: ArtifactId) -> Result<Vec<u8>, ApplicationError>;

    /// Delete an artifact, returning whether anything was removed
    async fn delete(&self, id: ArtifactId) -> Result<bool, ApplicationError>;

    /// Delete every artifact written before `cutoff`, returning the count
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, ApplicationError>;

    /// Check if the store can currently accept writes
    async fn is_available(&self) -> bool;
}
