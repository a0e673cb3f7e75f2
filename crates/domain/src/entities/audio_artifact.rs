//! Stored audio artifact entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::ArtifactId;

/// An audio file held by an artifact store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioArtifact {
    /// Identifier, also the public filename
    #[serde(serialize_with = "serialize_id")]
    pub id: ArtifactId,
    /// Backend-specific location (a path for disk stores)
    pub location: String,
    /// Size of the stored audio in bytes
    pub size_bytes: u64,
    /// When the artifact was written
    pub created_at: DateTime<Utc>,
}

impl AudioArtifact {
    /// Create an artifact record stamped with the current time
    #[must_use]
    pub fn new(id: ArtifactId, location: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id,
            location: location.into(),
            size_bytes,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        self.id.file_name()
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.id.mime_type()
    }
}

fn serialize_id<S: serde::Serializer>(id: &ArtifactId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}
