//! Text-to-speech request entity

use serde::Serialize;

use crate::errors::DomainError;
use crate::value_objects::{Language, Voice};

/// A validated speech synthesis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    text: String,
    language: Language,
    voice: Voice,
}

impl GenerationRequest {
    /// Validate raw request fields
    ///
    /// Text is trimmed and must not be empty. A missing language means
    /// [`Language::DEFAULT`]; the voice is resolved with [`Voice::lenient`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for missing/blank text and
    /// `UnsupportedLanguage` for a language outside the supported set.
    pub fn validate(
        text: Option<&str>,
        language: Option<&str>,
        voice: Option<&str>,
    ) -> Result<Self, DomainError> {
        let text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::invalid_input("text must not be empty"))?;
        let language = Language::parse_or_default(language)?;

        Ok(Self {
            text: text.to_string(),
            language,
            voice: Voice::lenient(voice),
        })
    }

    /// Build a request from already-typed parts, e.g. a transcript
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the text is blank.
    pub fn new(text: &str, language: Language, voice: Voice) -> Result<Self, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::invalid_input("text must not be empty"));
        }

        Ok(Self {
            text: text.to_string(),
            language,
            voice,
        })
    }

    /// Reject text longer than `max_chars` characters
    pub fn ensure_max_chars(&self, max_chars: usize) -> Result<(), DomainError> {
        let chars = self.text.chars().count();
        if chars > max_chars {
            return Err(DomainError::InvalidInput(format!(
                "text is {chars} characters long, maximum is {max_chars}"
            )));
        }
        Ok(())
    }

    /// Trimmed text to speak
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub const fn voice(&self) -> Voice {
        self.voice
    }
}
