//! OpenAI speech provider
//!
//! Whisper (`/audio/transcriptions`) for recognition and `/audio/speech` for
//! synthesis. Whisper accepts every upload format SpeechGate does; synthesis
//! is always requested as MP3.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Language, Voice};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{Stage, http_client, upstream_error};
use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioData, AudioFormat, Transcription};

/// Input limit of the `/audio/speech` endpoint
pub const OPENAI_TTS_MAX_CHARS: usize = 4096;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// OpenAI client implementing both recognition and synthesis
#[derive(Debug, Clone)]
pub struct OpenAISpeechProvider {
    client: Client,
    api_key: String,
    base_url: String,
    stt_model: String,
    tts_model: String,
    female_voice: String,
    male_voice: String,
}

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
}

impl OpenAISpeechProvider {
    /// Create a provider from the speech configuration
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` when no API key is set or the
    /// HTTP client cannot be built.
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SpeechError::Configuration("OpenAI API key is required".to_string()))?;

        Ok(Self {
            client: http_client(config.timeout_ms)?,
            api_key: api_key.to_string(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            stt_model: config.stt_model.clone(),
            tts_model: config.tts_model.clone(),
            female_voice: config.female_voice.clone(),
            male_voice: config.male_voice.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn voice_name(&self, voice: Voice) -> &str {
        match voice {
            Voice::Female => &self.female_voice,
            Voice::Male => &self.male_voice,
        }
    }

    /// Authenticated `GET /models`, used as a liveness probe
    async fn probe(&self) -> bool {
        let result = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.api_key)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e.without_url(), "OpenAI availability probe failed");
                false
            },
        }
    }
}

#[async_trait]
impl SpeechToText for OpenAISpeechProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.len(), format = ?audio.format(), language = %language))]
    async fn transcribe(
        &self,
        audio: AudioData,
        language: Language,
    ) -> Result<Transcription, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        let file_name = audio.upload_name();
        let mime_type = audio.format().mime_type();
        let file = Part::bytes(audio.into_vec())
            .file_name(file_name)
            .mime_str(mime_type)
            .map_err(|e| SpeechError::Configuration(format!("Invalid MIME type: {e}")))?;

        let form = Form::new()
            .part("file", file)
            .text("model", self.stt_model.clone())
            .text("language", language.code())
            .text("response_format", "json");

        let response = self
            .client
            .post(self.endpoint("audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, Stage::Transcription).await);
        }

        let body: WhisperResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse transcription: {e}")))?;

        debug!(text_len = body.text.len(), "Whisper transcription received");

        Ok(Transcription {
            text: body.text,
            language,
            duration: body.duration.and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
        })
    }

    async fn is_available(&self) -> bool {
        self.probe().await
    }

    fn model_name(&self) -> &str {
        &self.stt_model
    }
}

#[async_trait]
impl TextToSpeech for OpenAISpeechProvider {
    #[instrument(skip(self, text, _language), fields(text_len = text.len(), language = %_language, voice = %voice))]
    async fn synthesize(
        &self,
        text: &str,
        _language: Language,
        voice: Voice,
    ) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        let chars = text.chars().count();
        if chars > OPENAI_TTS_MAX_CHARS {
            return Err(SpeechError::TextTooLong {
                chars,
                limit: OPENAI_TTS_MAX_CHARS,
            });
        }

        // The model infers the language from the text itself
        let request = SpeechRequest {
            model: &self.tts_model,
            input: text,
            voice: self.voice_name(voice),
            response_format: AudioFormat::Mp3.extension(),
        };

        let response = self
            .client
            .post(self.endpoint("audio/speech"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, Stage::Synthesis).await);
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Provider returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio.len(), "OpenAI speech received");
        Ok(AudioData::new(audio, AudioFormat::Mp3))
    }

    async fn is_available(&self) -> bool {
        self.probe().await
    }

    fn model_name(&self) -> &str {
        &self.tts_model
    }
}
