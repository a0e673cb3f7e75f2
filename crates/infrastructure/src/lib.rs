//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the speech adapter
//! over the `ai_speech` providers and the artifact stores. Also owns
//! configuration loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, ServerConfig, StorageBackend, StorageConfig};
pub use persistence::{FilesystemArtifactStore, InMemoryArtifactStore};
pub use telemetry::{DEFAULT_LOG_FILTER, init_tracing};
