//! Scoped ownership of a staged artifact
//!
//! A [`ScopedArtifact`] deletes its artifact when released or dropped, so a
//! staged upload cannot outlive the request that created it.

use std::fmt;
use std::sync::Arc;

use domain::{ArtifactId, AudioArtifact};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::error::ApplicationError;
use crate::ports::ArtifactStore;

/// Guard owning a stored artifact until it is released
pub struct ScopedArtifact {
    store: Arc<dyn ArtifactStore>,
    artifact: AudioArtifact,
    armed: bool,
}

impl fmt::Debug for ScopedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedArtifact")
            .field("artifact", &self.artifact)
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

impl ScopedArtifact {
    /// Store `data` under `id` and take ownership of the result
    pub async fn stage(
        store: Arc<dyn ArtifactStore>,
        id: ArtifactId,
        data: Vec<u8>,
    ) -> Result<Self, ApplicationError> {
        let artifact = store.put(id, data).await?;
        debug!(artifact = %id, size_bytes = artifact.size_bytes, "Staged artifact");
        Ok(Self {
            store,
            artifact,
            armed: true,
        })
    }

    /// The guarded artifact
    pub const fn artifact(&self) -> &AudioArtifact {
        &self.artifact
    }

    /// Read the guarded artifact's bytes back from the store
    pub async fn read(&self) -> Result<Vec<u8>, ApplicationError> {
        self.store.get(self.artifact.id).await
    }

    /// Delete the artifact now, returning whether anything was removed
    ///
    /// Deletion failures are logged, not returned.
    pub async fn release(mut self) -> bool {
        self.armed = false;
        let id = self.artifact.id;
        match self.store.delete(id).await {
            Ok(removed) => {
                debug!(artifact = %id, removed, "Released staged artifact");
                removed
            },
            Err(e) => {
                warn!(artifact = %id, error = %e, "Failed to release staged artifact");
                false
            },
        }
    }
}

impl Drop for ScopedArtifact {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let id = self.artifact.id;
        let Ok(handle) = Handle::try_current() else {
            warn!(artifact = %id, "No runtime available, staged artifact left for retention");
            return;
        };

        let store = Arc::clone(&self.store);
        handle.spawn(async move {
            if let Err(e) = store.delete(id).await {
                warn!(artifact = %id, error = %e, "Failed to delete dropped staged artifact");
            }
        });
    }
}
