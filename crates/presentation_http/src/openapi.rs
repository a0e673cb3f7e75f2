//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document and a Swagger UI for the SpeechGate API.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// Path the OpenAPI document is served at
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for SpeechGate
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SpeechGate API",
        description = "Text-to-speech and speech-to-text over external speech services",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "This server")
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "system", description = "Service information and supported languages"),
        (name = "speech", description = "Synthesis, recognition and generated audio")
    ),
    paths(
        handlers::root::service_info,
        handlers::root::list_languages,
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::tts::synthesize,
        handlers::tts::generate,
        handlers::stt::transcribe,
        handlers::speech_to_speech::speech_to_speech,
        handlers::files::serve_audio,
    ),
    components(
        schemas(
            handlers::root::ServiceInfoResponse,
            handlers::root::LanguagesResponse,
            handlers::root::LanguageInfo,
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::ServiceStatus,
            handlers::tts::TtsRequest,
            handlers::tts::GenerateRequest,
            handlers::tts::TtsResponse,
            handlers::stt::SttForm,
            handlers::stt::SttResponse,
            handlers::speech_to_speech::SpeechToSpeechForm,
            handlers::speech_to_speech::SpeechToSpeechResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
///
/// - `/api-docs/openapi.json` - OpenAPI document
/// - `/swagger-ui` - Swagger UI
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
