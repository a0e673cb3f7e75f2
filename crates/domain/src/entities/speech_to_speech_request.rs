//! Speech-to-speech request entity

use crate::entities::RecognitionRequest;
use crate::errors::DomainError;
use crate::value_objects::{AudioFormat, Language};

/// A validated transcribe-then-synthesize request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechToSpeechRequest {
    recognition: RecognitionRequest,
    target_language: Language,
}

impl SpeechToSpeechRequest {
    /// Validate an uploaded clip with its source and target languages
    ///
    /// Both languages default to [`Language::DEFAULT`] when missing.
    ///
    /// # Errors
    ///
    /// Same as [`RecognitionRequest::validate`], plus `UnsupportedLanguage`
    /// for the target language.
    pub fn validate(
        audio: Vec<u8>,
        format: AudioFormat,
        source_language: Option<&str>,
        target_language: Option<&str>,
    ) -> Result<Self, DomainError> {
        let recognition = RecognitionRequest::validate(audio, format, source_language)?;
        let target_language = Language::parse_or_default(target_language)?;

        Ok(Self {
            recognition,
            target_language,
        })
    }

    #[must_use]
    pub const fn source_language(&self) -> Language {
        self.recognition.language()
    }

    #[must_use]
    pub const fn target_language(&self) -> Language {
        self.target_language
    }

    /// Split into the recognition stage and the synthesis language
    #[must_use]
    pub fn into_stages(self) -> (RecognitionRequest, Language) {
        (self.recognition, self.target_language)
    }
}
