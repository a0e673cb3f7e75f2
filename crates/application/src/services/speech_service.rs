//! Speech service - Synthesis, recognition and the speech-to-speech pipeline
//!
//! Orchestrates the speech provider port and the artifact store:
//! 1. Synthesis: text → provider → stored `audio_*` artifact → public URL
//! 2. Recognition: upload → staged `upload_*` artifact → provider → transcript
//! 3. Speech-to-speech: recognition followed by synthesis of the transcript

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use domain::{
    ArtifactId, ArtifactKind, AudioArtifact, GenerationRequest, Language, RecognitionRequest,
    SpeechToSpeechRequest, Voice,
};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{ArtifactStore, SpeechPort};
use crate::services::ScopedArtifact;

/// Configuration for the speech service
#[derive(Debug, Clone)]
pub struct SpeechServiceConfig {
    /// Externally visible scheme and host, without a trailing slash
    pub public_base_url: String,
    /// Longest text accepted for synthesis, in characters
    pub max_text_chars: usize,
}

impl Default for SpeechServiceConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".to_string(),
            max_text_chars: 5000,
        }
    }
}

/// Result of a synthesis request
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    /// Stored audio
    pub artifact: AudioArtifact,
    /// Public URL the audio can be fetched from
    pub audio_url: String,
    /// Language the text was spoken in
    pub language: Language,
    /// Voice that was requested
    pub voice: Voice,
}

/// Result of a recognition request
#[derive(Debug, Clone)]
pub struct RecognitionOutcome {
    /// Transcribed text
    pub text: String,
    /// Language the audio was transcribed in
    pub language: Language,
}

/// Result of the speech-to-speech pipeline
#[derive(Debug, Clone)]
pub struct SpeechToSpeechOutcome {
    /// Stored synthesized audio
    pub artifact: AudioArtifact,
    /// Public URL the audio can be fetched from
    pub audio_url: String,
    /// Transcript of the uploaded audio
    pub source_text: String,
    /// Language the transcript was spoken back in
    pub target_language: Language,
}

/// A stored artifact read back for serving
#[derive(Debug, Clone)]
pub struct FetchedArtifact {
    pub id: ArtifactId,
    pub data: Vec<u8>,
}

impl FetchedArtifact {
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.id.mime_type()
    }
}

/// Speech use cases
pub struct SpeechService {
    speech: Arc<dyn SpeechPort>,
    store: Arc<dyn ArtifactStore>,
    config: SpeechServiceConfig,
}

impl fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechService")
            .field("speech", &"<SpeechPort>")
            .field("store", &"<ArtifactStore>")
            .field("config", &self.config)
            .finish()
    }
}

impl SpeechService {
    /// Create a new speech service
    #[must_use]
    pub fn new(
        speech: Arc<dyn SpeechPort>,
        store: Arc<dyn ArtifactStore>,
        config: SpeechServiceConfig,
    ) -> Self {
        Self {
            speech,
            store,
            config: SpeechServiceConfig {
                public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
                ..config
            },
        }
    }

    /// Externally visible base URL used to build audio links
    pub fn public_base_url(&self) -> &str {
        &self.config.public_base_url
    }

    fn audio_url(&self, artifact: &AudioArtifact) -> String {
        format!("{}/{}", self.config.public_base_url, artifact.file_name())
    }

    /// Synthesize speech and store it as a public artifact
    #[instrument(skip(self, request), fields(language = %request.language(), voice = %request.voice()))]
    pub async fn synthesize(
        &self,
        request: GenerationRequest,
    ) -> Result<SynthesisOutcome, ApplicationError> {
        request.ensure_max_chars(self.config.max_text_chars)?;

        let result = self
            .speech
            .synthesize(
                request.text().to_string(),
                request.language(),
                request.voice(),
            )
            .await?;

        if result.audio_data.is_empty() {
            return Err(ApplicationError::ExternalService(
                "Speech provider returned no audio".to_string(),
            ));
        }

        let id = ArtifactId::generate(ArtifactKind::Speech, result.format);
        let artifact = self.store.put(id, result.audio_data).await?;
        let audio_url = self.audio_url(&artifact);

        info!(
            artifact = %artifact.id,
            size_bytes = artifact.size_bytes,
            "Speech synthesized"
        );

        Ok(SynthesisOutcome {
            artifact,
            audio_url,
            language: request.language(),
            voice: request.voice(),
        })
    }

    /// Transcribe an uploaded recording
    ///
    /// The upload is staged in the artifact store for the duration of the
    /// call and removed on every exit path.
    #[instrument(skip(self, request), fields(language = %request.language(), format = ?request.format(), audio_size = request.audio().len()))]
    pub async fn transcribe(
        &self,
        request: RecognitionRequest,
    ) -> Result<RecognitionOutcome, ApplicationError> {
        let (audio, format, language) = request.into_parts();

        let id = ArtifactId::generate(ArtifactKind::Upload, format);
        let staged = ScopedArtifact::stage(Arc::clone(&self.store), id, audio).await?;

        let result = match staged.read().await {
            Ok(audio) => self.speech.transcribe(audio, format, language).await,
            Err(e) => Err(e),
        };
        staged.release().await;

        let transcription = result.inspect_err(|e| warn!(error = %e, "Transcription failed"))?;
        debug!(text_len = transcription.text.len(), "Transcription complete");

        Ok(RecognitionOutcome {
            text: transcription.text,
            language,
        })
    }

    /// Transcribe a recording and speak the transcript back
    ///
    /// No translation is performed; the transcript is spoken as-is in the
    /// target language.
    #[instrument(skip(self, request), fields(source = %request.source_language(), target = %request.target_language()))]
    pub async fn speech_to_speech(
        &self,
        request: SpeechToSpeechRequest,
    ) -> Result<SpeechToSpeechOutcome, ApplicationError> {
        let (recognition, target_language) = request.into_stages();

        let recognized = self.transcribe(recognition).await?;
        if recognized.text.trim().is_empty() {
            return Err(ApplicationError::ExternalService(
                "No speech recognized".to_string(),
            ));
        }

        // A transcript the synthesis stage rejects is a pipeline failure
        let generation = GenerationRequest::new(&recognized.text, target_language, Voice::default())
            .map_err(ApplicationError::from)
            .map_err(into_pipeline_error)?;
        let source_text = generation.text().to_string();
        let synthesized = self
            .synthesize(generation)
            .await
            .map_err(into_pipeline_error)?;

        Ok(SpeechToSpeechOutcome {
            artifact: synthesized.artifact,
            audio_url: synthesized.audio_url,
            source_text,
            target_language,
        })
    }

    /// Look up a public artifact by its filename
    ///
    /// Anything that is not a well-formed public artifact name is reported
    /// as not found.
    #[instrument(skip(self))]
    pub async fn fetch_artifact(&self, file_name: &str) -> Result<FetchedArtifact, ApplicationError> {
        let not_found = || ApplicationError::NotFound(file_name.to_string());

        let id = ArtifactId::parse(file_name).map_err(|_| not_found())?;
        if !id.kind().is_public() {
            debug!("Refusing to serve staged upload");
            return Err(not_found());
        }

        let data = self.store.get(id).await?;
        Ok(FetchedArtifact { id, data })
    }

    /// Delete artifacts older than `retention`
    #[instrument(skip(self))]
    pub async fn purge_expired(&self, retention: Duration) -> Result<usize, ApplicationError> {
        let retention = chrono::Duration::from_std(retention)
            .map_err(|e| ApplicationError::Configuration(format!("Invalid retention: {e}")))?;
        let cutoff = Utc::now() - retention;

        let purged = self.store.purge_older_than(cutoff).await?;
        if purged > 0 {
            info!(purged, "Purged expired artifacts");
        }
        Ok(purged)
    }
}

fn into_pipeline_error(err: ApplicationError) -> ApplicationError {
    match err {
        ApplicationError::Domain(e) => {
            warn!(error = %e, "Transcript rejected for synthesis");
            ApplicationError::ExternalService(format!("Synthesis of transcript failed: {e}"))
        },
        other => other,
    }
}
