//! Provider traits
//!
//! Every speech backend implements one or both of these. The infrastructure
//! adapter holds them as trait objects and picks one per configuration.

use async_trait::async_trait;
use domain::{Language, Voice};

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Audio in, text out
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio spoken in `language`
    ///
    /// # Errors
    ///
    /// `SpeechError::EmptyAudio` for an empty clip, otherwise whatever the
    /// provider reports.
    async fn transcribe(
        &self,
        audio: AudioData,
        language: Language,
    ) -> Result<Transcription, SpeechError>;

    /// Cheap reachability check used by readiness probes
    async fn is_available(&self) -> bool;

    fn model_name(&self) -> &str;
}

/// Text in, audio out
///
/// ```ignore
/// let audio = tts.synthesize("Hola", Language::Spanish, Voice::Female).await?;
/// store.put(id, audio.into_vec()).await?;
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Speak `text` in `language`
    ///
    /// Providers without voice selection ignore `voice`.
    ///
    /// # Errors
    ///
    /// `SpeechError::EmptyText` for blank text, otherwise whatever the
    /// provider reports.
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: Voice,
    ) -> Result<AudioData, SpeechError>;

    /// Cheap reachability check used by readiness probes
    async fn is_available(&self) -> bool;

    fn model_name(&self) -> &str;
}
