//! Speech provider settings
//!
//! Deserialized from the `[speech]` section of the application config. Any
//! field left out takes its value from [`SpeechConfig::default`].

use serde::{Deserialize, Serialize};

use crate::providers::openai::OPENAI_TTS_MAX_CHARS;

/// Settings for the external speech services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Backend used for synthesis
    pub tts_provider: TtsProvider,
    /// Required for recognition and for the OpenAI synthesis backend
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    /// Whisper model
    pub stt_model: String,
    /// OpenAI speech model
    pub tts_model: String,
    /// OpenAI voice for `female` requests
    pub female_voice: String,
    /// OpenAI voice for `male` requests
    pub male_voice: String,
    pub google_base_url: String,
    /// Per-request timeout for provider calls
    pub timeout_ms: u64,
    /// Longest text accepted for synthesis, in characters
    pub max_text_chars: usize,
}

/// Synthesis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    /// Google Translate TTS, needs no key
    #[default]
    Google,
    /// OpenAI `/audio/speech`
    OpenAI,
}

impl TtsProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAI => "openai",
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            tts_provider: TtsProvider::Google,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            stt_model: "whisper-1".to_string(),
            tts_model: "tts-1".to_string(),
            female_voice: "nova".to_string(),
            male_voice: "onyx".to_string(),
            google_base_url: "https://translate.google.com".to_string(),
            timeout_ms: 30_000,
            max_text_chars: 5000,
        }
    }
}

impl SpeechConfig {
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            openai_api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    /// Whether a non-blank OpenAI API key is configured
    #[must_use]
    pub fn has_openai_key(&self) -> bool {
        self.openai_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Longest text the configured synthesis backend accepts
    ///
    /// `max_text_chars` capped at the OpenAI input limit when OpenAI
    /// synthesizes.
    #[must_use]
    pub fn effective_max_text_chars(&self) -> usize {
        match self.tts_provider {
            TtsProvider::Google => self.max_text_chars,
            TtsProvider::OpenAI => self.max_text_chars.min(OPENAI_TTS_MAX_CHARS),
        }
    }

    /// Check the settings for combinations that cannot work
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.tts_provider == TtsProvider::OpenAI && !self.has_openai_key() {
            return Err("OpenAI API key is required for the OpenAI TTS provider".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        if self.max_text_chars == 0 {
            return Err("Max text length must be greater than 0".to_string());
        }
        for (name, url) in [
            ("openai_base_url", &self.openai_base_url),
            ("google_base_url", &self.google_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{name} must be an http(s) URL"));
            }
        }
        Ok(())
    }
}
