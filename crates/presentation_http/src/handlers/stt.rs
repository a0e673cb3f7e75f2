//! Speech-to-text handler

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use domain::RecognitionRequest;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{error::ApiError, handlers::upload::AudioForm, state::AppState};

/// Multipart form of `/v1/stt`, for documentation only
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SttForm {
    /// Audio file (wav, mp3, flac, ogg, webm or m4a)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Language spoken in the recording (default `en`)
    pub language: Option<String>,
}

/// Transcription response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"text": "Hello, world!", "language": "en"}))]
pub struct SttResponse {
    pub text: String,
    pub language: String,
}

/// Transcribe an uploaded recording
#[utoipa::path(
    post,
    path = "/v1/stt",
    tag = "speech",
    request_body(content = SttForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Audio transcribed", body = SttResponse),
        (status = 400, description = "Missing audio or unsupported language", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::error::ErrorResponse),
        (status = 500, description = "Recognition provider failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SttResponse>, ApiError> {
    let mut form = AudioForm::read(multipart?).await?;
    let upload = form.take_file()?;
    let format = upload.format();

    let request = RecognitionRequest::validate(upload.data, format, form.field("language"))?;
    let outcome = state.speech_service.transcribe(request).await?;

    Ok(Json(SttResponse {
        text: outcome.text,
        language: outcome.language.code().to_string(),
    }))
}
