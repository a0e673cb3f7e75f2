//! Speech adapter - Implements SpeechPort using ai_speech crate

use std::sync::Arc;

use ai_speech::{
    AudioData, GoogleTranslateTtsProvider, OpenAISpeechProvider, SpeechConfig, SpeechError,
    SpeechToText, TextToSpeech, TtsProvider,
};
use application::error::ApplicationError;
use application::ports::{SpeechPort, SynthesisResult, TranscriptionResult};
use async_trait::async_trait;
use domain::{AudioFormat, Language, Voice};
use tracing::{debug, info, instrument, warn};

/// Adapter for speech services using ai_speech crate
pub struct SpeechAdapter {
    tts: Arc<dyn TextToSpeech>,
    stt: Option<Arc<dyn SpeechToText>>,
    provider: TtsProvider,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("provider", &self.provider)
            .field("tts_model", &self.tts.model_name())
            .field("stt_configured", &self.stt.is_some())
            .finish()
    }
}

impl SpeechAdapter {
    /// Create a new speech adapter
    ///
    /// Recognition needs an OpenAI API key; without one the adapter starts
    /// with recognition disabled and transcription requests fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a provider fails
    /// to initialize.
    pub fn new(config: &SpeechConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;

        let stt: Option<Arc<dyn SpeechToText>> = if config.has_openai_key() {
            let provider = OpenAISpeechProvider::new(config).map_err(Self::map_error)?;
            Some(Arc::new(provider))
        } else {
            warn!("No OpenAI API key configured, speech recognition is disabled");
            None
        };

        let tts: Arc<dyn TextToSpeech> = match config.tts_provider {
            TtsProvider::Google => {
                Arc::new(GoogleTranslateTtsProvider::new(config).map_err(Self::map_error)?)
            },
            TtsProvider::OpenAI => {
                Arc::new(OpenAISpeechProvider::new(config).map_err(Self::map_error)?)
            },
        };

        info!(
            provider = ?config.tts_provider,
            tts_model = %tts.model_name(),
            stt_enabled = stt.is_some(),
            "Speech adapter initialized"
        );

        Ok(Self {
            tts,
            stt,
            provider: config.tts_provider,
        })
    }

    /// Create an adapter from already constructed providers
    #[must_use]
    pub fn with_providers(
        tts: Arc<dyn TextToSpeech>,
        stt: Option<Arc<dyn SpeechToText>>,
        provider: TtsProvider,
    ) -> Self {
        Self { tts, stt, provider }
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        if err.is_transient() {
            warn!(error = %err, "Transient speech provider failure");
        }
        match err {
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, audio_data), fields(format = ?format, data_size = audio_data.len(), language = %language))]
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
        language: Language,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let Some(stt) = &self.stt else {
            return Err(Self::map_error(SpeechError::NotAvailable(
                "speech recognition requires an OpenAI API key".to_string(),
            )));
        };

        let transcription = stt
            .transcribe(AudioData::new(audio_data, format), language)
            .await
            .map_err(Self::map_error)?;

        let duration_ms = transcription
            .duration
            .and_then(|d| u64::try_from(d.as_millis()).ok());
        debug!(
            text_len = transcription.text.len(),
            ?duration_ms,
            "Transcription complete"
        );

        Ok(TranscriptionResult {
            text: transcription.text,
            language: transcription.language,
            duration_ms,
        })
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language, voice = %voice))]
    async fn synthesize(
        &self,
        text: String,
        language: Language,
        voice: Voice,
    ) -> Result<SynthesisResult, ApplicationError> {
        let audio = self
            .tts
            .synthesize(&text, language, voice)
            .await
            .map_err(Self::map_error)?;

        debug!(audio_size = audio.len(), "Synthesis complete");

        let format = audio.format();
        Ok(SynthesisResult {
            audio_data: audio.into_vec(),
            format,
        })
    }

    async fn is_synthesis_available(&self) -> bool {
        self.tts.is_available().await
    }

    async fn is_recognition_available(&self) -> bool {
        match &self.stt {
            Some(stt) => stt.is_available().await,
            None => false,
        }
    }

    fn synthesis_provider(&self) -> String {
        self.provider.as_str().to_string()
    }
}
