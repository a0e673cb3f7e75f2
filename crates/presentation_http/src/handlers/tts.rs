//! Text-to-speech handlers

use application::SynthesisOutcome;
use axum::{Json, extract::State};
use domain::GenerationRequest;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Text spoken by `/v1/generate` when the body has none
pub const DEFAULT_GENERATE_TEXT: &str = "Hello from Chatterbox!";

/// Synthesis request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"text": "Hello, world!", "language": "en", "voice": "female"}))]
pub struct TtsRequest {
    /// Text to speak
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: Option<String>,
    /// Language code (default `en`)
    #[serde(default)]
    pub language: Option<String>,
    /// `male` or `female`; anything else is treated as `female`
    #[serde(default)]
    pub voice: Option<String>,
}

/// Legacy synthesis request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"text": "Hello from Chatterbox!", "language": "en"}))]
pub struct GenerateRequest {
    /// Text to speak (default "Hello from Chatterbox!")
    #[serde(default)]
    pub text: Option<String>,
    /// Language code (default `en`)
    #[serde(default)]
    pub language: Option<String>,
}

/// Synthesis response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "audio_url": "https://speech.example.com/audio_0b7c4c1e-3f2a-4c55-9d1e-6f7b8a9c0d1e.mp3",
    "language": "en",
    "voice": "female"
}))]
pub struct TtsResponse {
    /// Where the generated MP3 can be fetched
    pub audio_url: String,
    pub language: String,
    /// Voice that was used after normalization
    pub voice: String,
}

impl From<SynthesisOutcome> for TtsResponse {
    fn from(outcome: SynthesisOutcome) -> Self {
        Self {
            audio_url: outcome.audio_url,
            language: outcome.language.code().to_string(),
            voice: outcome.voice.as_str().to_string(),
        }
    }
}

/// Synthesize speech from text
#[utoipa::path(
    post,
    path = "/v1/tts",
    tag = "speech",
    request_body = TtsRequest,
    responses(
        (status = 200, description = "Speech synthesized", body = TtsResponse),
        (status = 400, description = "Invalid text or unsupported language", body = crate::error::ErrorResponse),
        (status = 413, description = "Body too large", body = crate::error::ErrorResponse),
        (status = 500, description = "Synthesis provider failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(text_len = request.text.as_deref().map_or(0, str::len)))]
pub async fn synthesize(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TtsRequest>,
) -> Result<Json<TtsResponse>, ApiError> {
    let generation = GenerationRequest::validate(
        request.text.as_deref(),
        request.language.as_deref(),
        request.voice.as_deref(),
    )?;

    let outcome = state.speech_service.synthesize(generation).await?;
    Ok(Json(outcome.into()))
}

/// Synthesize speech with the legacy defaults
#[utoipa::path(
    post,
    path = "/v1/generate",
    tag = "speech",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Speech synthesized", body = TtsResponse),
        (status = 400, description = "Invalid text or unsupported language", body = crate::error::ErrorResponse),
        (status = 500, description = "Synthesis provider failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn generate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateRequest>,
) -> Result<Json<TtsResponse>, ApiError> {
    let text = request.text.as_deref().unwrap_or(DEFAULT_GENERATE_TEXT);
    let generation = GenerationRequest::validate(Some(text), request.language.as_deref(), None)?;

    let outcome = state.speech_service.synthesize(generation).await?;
    Ok(Json(outcome.into()))
}
