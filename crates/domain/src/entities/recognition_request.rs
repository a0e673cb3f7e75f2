//! Speech-to-text request entity

use crate::errors::DomainError;
use crate::value_objects::{AudioFormat, Language};

/// A validated speech recognition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionRequest {
    audio: Vec<u8>,
    format: AudioFormat,
    language: Language,
}

impl RecognitionRequest {
    /// Validate an uploaded clip and its language
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty upload and `UnsupportedLanguage`
    /// for a language outside the supported set.
    pub fn validate(
        audio: Vec<u8>,
        format: AudioFormat,
        language: Option<&str>,
    ) -> Result<Self, DomainError> {
        if audio.is_empty() {
            return Err(DomainError::invalid_input("audio file must not be empty"));
        }
        let language = Language::parse_or_default(language)?;

        Ok(Self {
            audio,
            format,
            language,
        })
    }

    #[must_use]
    pub fn audio(&self) -> &[u8] {
        &self.audio
    }

    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Split into owned parts
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, AudioFormat, Language) {
        (self.audio, self.format, self.language)
    }
}
