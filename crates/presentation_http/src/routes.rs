//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    error::ApiError, handlers, middleware::RequestIdLayer, openapi::create_openapi_routes,
    state::AppState,
};

/// Create the main router with all routes
///
/// Named routes win over the `/{filename}` capture. JSON and upload routes
/// get their own body size limits.
pub fn create_router(state: AppState) -> Router {
    let json_routes = Router::new()
        .route("/v1/tts", post(handlers::tts::synthesize))
        .route("/v1/generate", post(handlers::tts::generate))
        .layer(DefaultBodyLimit::max(state.server.max_body_size_json_bytes));

    let upload_routes = Router::new()
        .route("/v1/stt", post(handlers::stt::transcribe))
        .route(
            "/v1/speech2speech",
            post(handlers::speech_to_speech::speech_to_speech),
        )
        .layer(DefaultBodyLimit::max(state.server.max_body_size_audio_bytes));

    Router::new()
        // Service info
        .route("/", get(handlers::root::service_info))
        .route("/v1/languages", get(handlers::root::list_languages))
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Speech API (v1)
        .merge(json_routes)
        .merge(upload_routes)
        // API docs
        .merge(create_openapi_routes())
        // Generated audio
        .route("/{filename}", get(handlers::files::serve_audio))
        .fallback(route_not_found)
        .layer(RequestIdLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound
}
