//! Speech provider errors

use thiserror::Error;

/// Errors returned by speech providers
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No audio was handed to a recognizer
    #[error("Audio data is empty")]
    EmptyAudio,

    /// No text was handed to a synthesizer
    #[error("Text cannot be empty")]
    EmptyText,

    /// Text exceeds what the provider accepts in one request
    #[error("Text too long: {chars} characters exceeds the {limit} character limit")]
    TextTooLong { chars: usize, limit: usize },

    /// The provider could not be reached
    #[error("Could not reach speech provider: {0}")]
    Transport(String),

    /// The provider did not answer within the configured timeout
    #[error("Speech provider timed out")]
    Timeout,

    /// The provider throttled the request
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The provider answered but could not transcribe
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// The provider answered but could not synthesize
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// The provider answered with something unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider settings are unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider is not configured
    #[error("Provider not available: {0}")]
    NotAvailable(String),
}

impl SpeechError {
    /// Whether retrying the same request later may succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout | Self::RateLimited)
    }
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        // Request URLs can carry the text being spoken
        Self::Transport(err.without_url().to_string())
    }
}
