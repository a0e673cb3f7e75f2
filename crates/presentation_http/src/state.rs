//! Application state shared across handlers

use std::sync::Arc;

use application::{HealthService, SpeechService};
use infrastructure::ServerConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Synthesis, recognition and artifact lookup
    pub speech_service: Arc<SpeechService>,
    /// Readiness checks
    pub health_service: Arc<HealthService>,
    /// HTTP server settings (body limits, public URL)
    pub server: Arc<ServerConfig>,
}
