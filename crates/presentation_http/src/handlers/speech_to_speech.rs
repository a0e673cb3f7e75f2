//! Speech-to-speech handler

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use domain::SpeechToSpeechRequest;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{error::ApiError, handlers::upload::AudioForm, state::AppState};

/// Multipart form of `/v1/speech2speech`, for documentation only
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SpeechToSpeechForm {
    /// Audio file (wav, mp3, flac, ogg, webm or m4a)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Language spoken in the recording (default `en`)
    pub source_language: Option<String>,
    /// Language to speak the transcript in (default `en`)
    pub target_language: Option<String>,
}

/// Speech-to-speech response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "audio_url": "https://speech.example.com/audio_0b7c4c1e-3f2a-4c55-9d1e-6f7b8a9c0d1e.mp3",
    "source_text": "Hello, world!",
    "target_language": "es"
}))]
pub struct SpeechToSpeechResponse {
    pub audio_url: String,
    /// Transcript of the upload
    pub source_text: String,
    pub target_language: String,
}

/// Transcribe a recording and speak the transcript back
///
/// The transcript is not translated; it is read out with the voice of the
/// target language.
#[utoipa::path(
    post,
    path = "/v1/speech2speech",
    tag = "speech",
    request_body(content = SpeechToSpeechForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Speech regenerated", body = SpeechToSpeechResponse),
        (status = 400, description = "Missing audio or unsupported language", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::error::ErrorResponse),
        (status = 500, description = "A provider failed or no speech was recognized", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn speech_to_speech(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SpeechToSpeechResponse>, ApiError> {
    let mut form = AudioForm::read(multipart?).await?;
    let upload = form.take_file()?;
    let format = upload.format();

    let request = SpeechToSpeechRequest::validate(
        upload.data,
        format,
        form.field("source_language"),
        form.field("target_language"),
    )?;
    let outcome = state.speech_service.speech_to_speech(request).await?;

    Ok(Json(SpeechToSpeechResponse {
        audio_url: outcome.audio_url,
        source_text: outcome.source_text,
        target_language: outcome.target_language.code().to_string(),
    }))
}
