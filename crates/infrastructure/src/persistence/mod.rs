//! Persistence module
//!
//! Artifact stores for generated audio and staged uploads.

mod filesystem_artifact_store;
mod memory_artifact_store;

pub use filesystem_artifact_store::FilesystemArtifactStore;
pub use memory_artifact_store::InMemoryArtifactStore;
