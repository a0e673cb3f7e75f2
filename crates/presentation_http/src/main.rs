//! SpeechGate HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{ArtifactStore, HealthService, SpeechPort, SpeechService, SpeechServiceConfig};
use infrastructure::{
    AppConfig, FilesystemArtifactStore, InMemoryArtifactStore, SpeechAdapter, StorageBackend,
    init_tracing,
};
use presentation_http::{
    AppState, create_router, serve_with_shutdown, set_expose_internal_errors,
    spawn_artifact_cleanup_task,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.server.log_format)?;

    info!("🔊 SpeechGate v{} starting...", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    set_expose_internal_errors(config.server.expose_internal_errors);

    let public_base_url = config.server.public_base_url();
    info!(
        bind = %config.server.bind_address(),
        public_base_url = %public_base_url,
        tts_provider = ?config.speech.tts_provider,
        storage = ?config.storage.backend,
        "Configuration loaded"
    );

    // Artifact store
    let store: Arc<dyn ArtifactStore> = match config.storage.backend {
        StorageBackend::Filesystem => Arc::new(
            FilesystemArtifactStore::open(config.storage.directory.clone())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to open artifact directory: {e}"))?,
        ),
        StorageBackend::Memory => Arc::new(InMemoryArtifactStore::new()),
    };

    // Speech providers
    let speech: Arc<dyn SpeechPort> = Arc::new(
        SpeechAdapter::new(&config.speech)
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech providers: {e}"))?,
    );

    // Services
    let speech_service = Arc::new(SpeechService::new(
        Arc::clone(&speech),
        Arc::clone(&store),
        SpeechServiceConfig {
            public_base_url,
            max_text_chars: config.speech.effective_max_text_chars(),
        },
    ));
    let health_service = Arc::new(HealthService::new(speech, store));

    let cleanup_handle = config.storage.retention().map(|retention| {
        spawn_artifact_cleanup_task(
            Arc::clone(&speech_service),
            retention,
            config.storage.cleanup_interval(),
        )
    });

    let state = AppState {
        speech_service,
        health_service,
        server: Arc::new(config.server.clone()),
    };

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    let app = create_router(state).layer(cors_layer);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/swagger-ui", addr);

    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let outcome = serve_with_shutdown(listener, app, shutdown_signal(), drain_timeout).await?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    info!(?outcome, "👋 Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
