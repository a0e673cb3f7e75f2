//! Speech port - Interface for speech-to-text and text-to-speech operations

use async_trait::async_trait;
use domain::{AudioFormat, Language, Voice};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a transcription operation
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Language the audio was transcribed in
    pub language: Language,
    /// Duration of audio in milliseconds
    pub duration_ms: Option<u64>,
}

/// Result of a speech synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Generated audio data
    pub audio_data: Vec<u8>,
    /// Format of the audio
    pub format: AudioFormat,
}

/// Port for speech processing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Transcribe audio data to text (Speech-to-Text)
    ///
    /// # Arguments
    /// * `audio_data` - Raw audio bytes
    /// * `format` - Format of the audio
    /// * `language` - Language spoken in the audio
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
        language: Language,
    ) -> Result<TranscriptionResult, ApplicationError>;

    /// Synthesize speech from text (Text-to-Speech)
    ///
    /// # Arguments
    /// * `text` - Text to synthesize
    /// * `language` - Language to speak the text in
    /// * `voice` - Requested voice; providers without voice selection ignore it
    async fn synthesize(
        &self,
        text: String,
        language: Language,
        voice: Voice,
    ) -> Result<SynthesisResult, ApplicationError>;

    /// Check if the synthesis provider is reachable
    async fn is_synthesis_available(&self) -> bool;

    /// Check if the recognition provider is configured and reachable
    async fn is_recognition_available(&self) -> bool;

    /// Name of the active synthesis provider
    fn synthesis_provider(&self) -> String;
}
