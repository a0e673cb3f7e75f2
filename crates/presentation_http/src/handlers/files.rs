//! Generated audio download

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Download a generated audio file
///
/// Only names of the form `audio_{uuid}.{ext}` can resolve; everything else,
/// including staged uploads and path tricks, is a 404.
#[utoipa::path(
    get,
    path = "/{filename}",
    tag = "speech",
    params(
        ("filename" = String, Path, description = "Filename from a previous `audio_url`")
    ),
    responses(
        (status = 200, description = "Audio bytes", content_type = "audio/mpeg"),
        (status = 404, description = "File not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn serve_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let artifact = state.speech_service.fetch_artifact(&filename).await?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime_type()),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        artifact.data,
    ))
}
