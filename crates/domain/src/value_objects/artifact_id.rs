//! Artifact identifier value object
//!
//! An artifact id doubles as the artifact's public filename:
//! `{prefix}_{uuid}.{extension}`. Only strings of exactly that shape parse,
//! which keeps file lookups inside the artifact namespace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::value_objects::AudioFormat;

/// What produced an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Audio produced by speech synthesis
    Speech,
    /// Caller upload staged for recognition
    Upload,
}

impl ArtifactKind {
    /// Filename prefix
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Speech => "audio",
            Self::Upload => "upload",
        }
    }

    /// Whether artifacts of this kind may be served to callers
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Speech)
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "audio" => Some(Self::Speech),
            "upload" => Some(Self::Upload),
            _ => None,
        }
    }
}

/// Unique identifier of a stored audio artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId {
    kind: ArtifactKind,
    token: Uuid,
    format: AudioFormat,
}

impl ArtifactId {
    /// Generate a fresh id with a random token
    #[must_use]
    pub fn generate(kind: ArtifactKind, format: AudioFormat) -> Self {
        Self {
            kind,
            token: Uuid::new_v4(),
            format,
        }
    }

    /// Parse a filename produced by [`ArtifactId::file_name`]
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArtifactId` for anything that is not
    /// exactly `{prefix}_{hyphenated-uuid}.{canonical-extension}`.
    pub fn parse(file_name: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidArtifactId(file_name.to_string());

        let (stem, ext) = file_name.rsplit_once('.').ok_or_else(invalid)?;
        let (prefix, raw_token) = stem.split_once('_').ok_or_else(invalid)?;

        let kind = ArtifactKind::from_prefix(prefix).ok_or_else(invalid)?;
        let format = AudioFormat::from_extension(ext)
            .filter(|format| format.extension() == ext)
            .ok_or_else(invalid)?;
        let token = Uuid::try_parse(raw_token).map_err(|_| invalid())?;

        // Reject braced, simple and urn spellings of the same uuid
        if token.hyphenated().to_string() != raw_token {
            return Err(invalid());
        }

        Ok(Self {
            kind,
            token,
            format,
        })
    }

    /// What produced this artifact
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Random token
    #[must_use]
    pub const fn token(&self) -> Uuid {
        self.token
    }

    /// Audio format of the artifact
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// MIME type to serve the artifact with
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Filename under which the artifact is stored and served
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.{}",
            self.kind.prefix(),
            self.token.hyphenated(),
            self.format.extension()
        )
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

impl FromStr for ArtifactId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
