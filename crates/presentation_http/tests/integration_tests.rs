//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::{
    future::IntoFuture,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use application::{
    ArtifactStore, HealthService, SpeechPort, SpeechService, SpeechServiceConfig,
    SynthesisResult, TranscriptionResult, error::ApplicationError,
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use domain::{ArtifactId, ArtifactKind, AudioFormat, Language, Voice};
use infrastructure::{InMemoryArtifactStore, ServerConfig};
use presentation_http::{REQUEST_ID_HEADER, routes::create_router, state::AppState};
use serde_json::{Value, json};

const PUBLIC_BASE_URL: &str = "https://speech.test";

/// Scripted speech provider
struct StubSpeech {
    transcript: String,
    fail_transcribe: bool,
    fail_synthesize: bool,
    synthesis_available: bool,
    transcribe_calls: AtomicUsize,
}

impl StubSpeech {
    fn new() -> Self {
        Self {
            transcript: "hello world".to_string(),
            fail_transcribe: false,
            fail_synthesize: false,
            synthesis_available: true,
            transcribe_calls: AtomicUsize::new(0),
        }
    }

    fn with_transcript(mut self, transcript: &str) -> Self {
        self.transcript = transcript.to_string();
        self
    }

    fn failing_transcription(mut self) -> Self {
        self.fail_transcribe = true;
        self
    }

    fn failing_synthesis(mut self) -> Self {
        self.fail_synthesize = true;
        self
    }

    fn synthesis_down(mut self) -> Self {
        self.synthesis_available = false;
        self
    }
}

#[async_trait]
impl SpeechPort for StubSpeech {
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        _format: AudioFormat,
        language: Language,
    ) -> Result<TranscriptionResult, ApplicationError> {
        self.transcribe_calls.fetch_add(1, Ordering::SeqCst);
        assert!(!audio_data.is_empty());
        if self.fail_transcribe {
            return Err(ApplicationError::ExternalService(
                "Whisper rejected the audio".to_string(),
            ));
        }
        Ok(TranscriptionResult {
            text: self.transcript.clone(),
            language,
            duration_ms: Some(1200),
        })
    }

    async fn synthesize(
        &self,
        text: String,
        language: Language,
        voice: Voice,
    ) -> Result<SynthesisResult, ApplicationError> {
        if self.fail_synthesize {
            return Err(ApplicationError::ExternalService(
                "TTS quota exceeded".to_string(),
            ));
        }
        Ok(SynthesisResult {
            audio_data: format!("ID3:{language}:{voice}:{text}").into_bytes(),
            format: AudioFormat::Mp3,
        })
    }

    async fn is_synthesis_available(&self) -> bool {
        self.synthesis_available
    }

    async fn is_recognition_available(&self) -> bool {
        false
    }

    fn synthesis_provider(&self) -> String {
        "stub-tts".to_string()
    }
}

struct TestApp {
    server: TestServer,
    store: InMemoryArtifactStore,
    speech: Arc<StubSpeech>,
}

fn create_app_with(speech: StubSpeech, server_config: ServerConfig) -> TestApp {
    let speech = Arc::new(speech);
    let store = InMemoryArtifactStore::new();
    let port: Arc<dyn SpeechPort> = speech.clone();
    let artifacts: Arc<dyn ArtifactStore> = Arc::new(store.clone());

    let state = AppState {
        speech_service: Arc::new(SpeechService::new(
            Arc::clone(&port),
            Arc::clone(&artifacts),
            SpeechServiceConfig {
                public_base_url: PUBLIC_BASE_URL.to_string(),
                max_text_chars: 5000,
            },
        )),
        health_service: Arc::new(HealthService::new(port, artifacts)),
        server: Arc::new(server_config),
    };

    TestApp {
        server: TestServer::new(create_router(state)).expect("Failed to create test server"),
        store,
        speech,
    }
}

fn create_app(speech: StubSpeech) -> TestApp {
    create_app_with(speech, ServerConfig::default())
}

fn create_test_server() -> TestServer {
    create_app(StubSpeech::new()).server
}

fn audio_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(b"RIFF....WAVEfmt ".to_vec())
            .file_name("clip.wav")
            .mime_type("audio/wav"),
    )
}

fn file_name_of(audio_url: &str) -> &str {
    audio_url
        .rsplit('/')
        .next()
        .expect("audio_url has a filename")
}

fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["code"], code);
    assert!(body["error"].is_string());
}

// ============ Info Endpoint Tests ============

#[tokio::test]
async fn root_lists_supported_languages() {
    let server = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["service"], "SpeechGate");
    assert!(body["message"].is_string());
    assert_eq!(
        body["languages"],
        json!({
            "de": "German",
            "en": "English",
            "es": "Spanish",
            "fr": "French",
            "hi": "Hindi",
            "ja": "Japanese"
        })
    );
}

#[tokio::test]
async fn languages_endpoint_lists_codes() {
    let server = create_test_server();

    let response = server.get("/v1/languages").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["default"], "en");
    assert_eq!(body["languages"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/v1/tts"].is_object());
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn readiness_ignores_missing_recognition() {
    let server = create_test_server();

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["services"]["synthesis"]["healthy"], true);
    assert_eq!(body["services"]["recognition"]["healthy"], false);
    assert_eq!(body["services"]["storage"]["healthy"], true);
}

#[tokio::test]
async fn readiness_fails_without_synthesis() {
    let server = create_app(StubSpeech::new().synthesis_down()).server;

    let response = server.get("/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["services"]["synthesis"]["healthy"], false);
}

// ============ TTS Endpoint Tests ============

#[tokio::test]
async fn tts_succeeds_for_every_supported_language() {
    let server = create_test_server();

    for code in ["en", "es", "fr", "de", "hi", "ja"] {
        let response = server
            .post("/v1/tts")
            .json(&json!({"text": "Hello", "language": code}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let audio_url = body["audio_url"].as_str().expect("audio_url");
        assert!(audio_url.starts_with(PUBLIC_BASE_URL), "{audio_url}");
        assert!(audio_url.ends_with(".mp3"), "{audio_url}");
        assert_eq!(body["language"], code);
        assert_eq!(body["voice"], "female");
    }
}

#[tokio::test]
async fn tts_normalizes_language_code() {
    let server = create_test_server();

    let response = server
        .post("/v1/tts")
        .json(&json!({"text": "Hola", "language": "  ES "}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["language"], "es");
}

#[tokio::test]
async fn tts_rejects_blank_text() {
    let server = create_test_server();

    for text in ["", "   ", "\n\t"] {
        let response = server
            .post("/v1/tts")
            .json(&json!({"text": text, "language": "en"}))
            .await;

        response.assert_status_bad_request();
        assert_error(&response.json(), "invalid_input");
    }
}

#[tokio::test]
async fn tts_rejects_missing_text() {
    let server = create_test_server();

    let response = server.post("/v1/tts").json(&json!({"language": "en"})).await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "invalid_input");
}

#[tokio::test]
async fn tts_rejects_unsupported_language() {
    let server = create_test_server();

    for language in ["xx", "english", "pt", ""] {
        let response = server
            .post("/v1/tts")
            .json(&json!({"text": "Hello", "language": language}))
            .await;

        response.assert_status_bad_request();
        assert_error(&response.json(), "unsupported_language");
    }
}

#[tokio::test]
async fn tts_coerces_unknown_voice_to_female() {
    let server = create_test_server();

    let response = server
        .post("/v1/tts")
        .json(&json!({"text": "Hello", "language": "en", "voice": "robot"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["voice"], "female");
}

#[tokio::test]
async fn tts_accepts_male_voice_in_any_case() {
    let server = create_test_server();

    let response = server
        .post("/v1/tts")
        .json(&json!({"text": "Hello", "language": "en", "voice": "MALE"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["voice"], "male");
}

#[tokio::test]
async fn tts_rejects_text_over_limit() {
    let server = create_test_server();

    let response = server
        .post("/v1/tts")
        .json(&json!({"text": "a".repeat(5001), "language": "en"}))
        .await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "invalid_input");
}

#[tokio::test]
async fn tts_rejects_malformed_json() {
    let server = create_test_server();

    let response = server
        .post("/v1/tts")
        .text("{\"text\": ")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "invalid_input");
}

#[tokio::test]
async fn tts_rejects_oversized_body() {
    let config = ServerConfig {
        max_body_size_json_bytes: 256,
        ..ServerConfig::default()
    };
    let server = create_app_with(StubSpeech::new(), config).server;

    let response = server
        .post("/v1/tts")
        .json(&json!({"text": "a".repeat(1024), "language": "en"}))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_error(&response.json(), "payload_too_large");
}

#[tokio::test]
async fn tts_provider_failure_is_service_error() {
    let server = create_app(StubSpeech::new().failing_synthesis()).server;

    let response = server
        .post("/v1/tts")
        .json(&json!({"text": "Hello", "language": "en"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_error(&body, "service_error");
    assert_eq!(body["error"], "TTS quota exceeded");
}

#[tokio::test]
async fn concurrent_tts_requests_get_distinct_urls() {
    let server = create_test_server();
    let payload = json!({"text": "Same text", "language": "en"});

    let (first, second) = tokio::join!(
        server.post("/v1/tts").json(&payload).into_future(),
        server.post("/v1/tts").json(&payload).into_future(),
    );

    first.assert_status_ok();
    second.assert_status_ok();
    let first: Value = first.json();
    let second: Value = second.json();
    assert_ne!(first["audio_url"], second["audio_url"]);
}

// ============ Legacy Generate Endpoint Tests ============

#[tokio::test]
async fn generate_uses_defaults() {
    let app = create_app(StubSpeech::new());

    let response = app.server.post("/v1/generate").json(&json!({})).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["language"], "en");

    let file = file_name_of(body["audio_url"].as_str().expect("audio_url"));
    let audio = app.server.get(&format!("/{file}")).await;
    audio.assert_status_ok();
    assert_eq!(audio.as_bytes().as_ref(), b"ID3:en:female:Hello from Chatterbox!");
}

#[tokio::test]
async fn generate_rejects_unsupported_language() {
    let server = create_test_server();

    let response = server
        .post("/v1/generate")
        .json(&json!({"text": "Hi", "language": "klingon"}))
        .await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "unsupported_language");
}

// ============ File Endpoint Tests ============

#[tokio::test]
async fn generated_audio_can_be_fetched() {
    let server = create_test_server();

    let response = server
        .post("/v1/tts")
        .json(&json!({"text": "Fetch me", "language": "de", "voice": "male"}))
        .await;
    let body: Value = response.json();
    let file = file_name_of(body["audio_url"].as_str().expect("audio_url"));

    let audio = server.get(&format!("/{file}")).await;

    audio.assert_status_ok();
    assert_eq!(audio.header("content-type"), "audio/mpeg");
    assert_eq!(audio.as_bytes().as_ref(), b"ID3:de:male:Fetch me");
}

#[tokio::test]
async fn unknown_audio_is_not_found() {
    let server = create_test_server();
    let missing = ArtifactId::generate(ArtifactKind::Speech, AudioFormat::Mp3);

    let response = server.get(&format!("/{missing}")).await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "File not found", "code": "not_found"}));
}

#[tokio::test]
async fn foreign_and_traversal_names_are_not_found() {
    let server = create_test_server();

    for path in [
        "/Cargo.toml",
        "/..%2FCargo.toml",
        "/audio_not-a-uuid.mp3",
        "/favicon.ico",
        "/v1/unknown",
    ] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        assert_error(&response.json(), "not_found");
    }
}

#[tokio::test]
async fn staged_uploads_are_never_served() {
    let app = create_app(StubSpeech::new());
    let id = ArtifactId::generate(ArtifactKind::Upload, AudioFormat::Wav);
    app.store
        .put(id, b"secret".to_vec())
        .await
        .expect("put upload");

    let response = app.server.get(&format!("/{id}")).await;

    response.assert_status_not_found();
}

// ============ STT Endpoint Tests ============

#[tokio::test]
async fn stt_returns_transcript() {
    let app = create_app(StubSpeech::new().with_transcript("guten tag"));

    let response = app
        .server
        .post("/v1/stt")
        .multipart(audio_form().add_text("language", "de"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({"text": "guten tag", "language": "de"}));
    assert!(app.store.is_empty(), "staged upload left behind");
}

#[tokio::test]
async fn stt_defaults_to_english() {
    let server = create_test_server();

    let response = server.post("/v1/stt").multipart(audio_form()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["language"], "en");
}

#[tokio::test]
async fn stt_failure_removes_staged_upload() {
    let app = create_app(StubSpeech::new().failing_transcription());

    let response = app.server.post("/v1/stt").multipart(audio_form()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_error(&body, "service_error");
    assert_eq!(body["error"], "Whisper rejected the audio");
    assert_eq!(app.speech.transcribe_calls.load(Ordering::SeqCst), 1);
    assert!(app.store.is_empty(), "staged upload left behind");
}

#[tokio::test]
async fn stt_requires_file() {
    let app = create_app(StubSpeech::new());

    let response = app
        .server
        .post("/v1/stt")
        .multipart(MultipartForm::new().add_text("language", "en"))
        .await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "invalid_input");
    assert_eq!(app.speech.transcribe_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stt_rejects_empty_file() {
    let server = create_test_server();

    let response = server
        .post("/v1/stt")
        .multipart(MultipartForm::new().add_part(
            "file",
            Part::bytes(Vec::new()).file_name("empty.wav"),
        ))
        .await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "invalid_input");
}

#[tokio::test]
async fn stt_rejects_unsupported_language() {
    let server = create_test_server();

    let response = server
        .post("/v1/stt")
        .multipart(audio_form().add_text("language", "xx"))
        .await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "unsupported_language");
}

#[tokio::test]
async fn stt_rejects_non_multipart_body() {
    let server = create_test_server();

    let response = server
        .post("/v1/stt")
        .json(&json!({"file": "not audio"}))
        .await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "invalid_input");
}

#[tokio::test]
async fn stt_rejects_oversized_upload() {
    let config = ServerConfig {
        max_body_size_audio_bytes: 1024,
        ..ServerConfig::default()
    };
    let app = create_app_with(StubSpeech::new(), config);

    let response = app
        .server
        .post("/v1/stt")
        .multipart(MultipartForm::new().add_part(
            "file",
            Part::bytes(vec![0_u8; 8 * 1024])
                .file_name("big.wav")
                .mime_type("audio/wav"),
        ))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_error(&response.json(), "payload_too_large");
    assert!(app.store.is_empty());
}

// ============ Speech-to-Speech Endpoint Tests ============

#[tokio::test]
async fn speech_to_speech_returns_transcript_and_audio() {
    let app = create_app(StubSpeech::new().with_transcript("good morning"));

    let response = app
        .server
        .post("/v1/speech2speech")
        .multipart(
            audio_form()
                .add_text("source_language", "en")
                .add_text("target_language", "fr"),
        )
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["source_text"], "good morning");
    assert_eq!(body["target_language"], "fr");

    let file = file_name_of(body["audio_url"].as_str().expect("audio_url"));
    let audio = app.server.get(&format!("/{file}")).await;
    audio.assert_status_ok();
    assert_eq!(audio.as_bytes().as_ref(), b"ID3:fr:female:good morning");

    let ids = app.store.ids();
    assert_eq!(ids.len(), 1);
    assert_eq!(ids[0].kind(), ArtifactKind::Speech);
}

#[tokio::test]
async fn speech_to_speech_without_speech_is_service_error() {
    let app = create_app(StubSpeech::new().with_transcript("   "));

    let response = app
        .server
        .post("/v1/speech2speech")
        .multipart(audio_form())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error(&response.json(), "service_error");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn speech_to_speech_rejects_bad_target_language() {
    let app = create_app(StubSpeech::new());

    let response = app
        .server
        .post("/v1/speech2speech")
        .multipart(audio_form().add_text("target_language", "xx"))
        .await;

    response.assert_status_bad_request();
    assert_error(&response.json(), "unsupported_language");
    assert_eq!(app.speech.transcribe_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn speech_to_speech_synthesis_failure_cleans_up() {
    let app = create_app(StubSpeech::new().failing_synthesis());

    let response = app
        .server
        .post("/v1/speech2speech")
        .multipart(audio_form())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error(&response.json(), "service_error");
    assert!(app.store.is_empty());
}

// ============ Middleware Tests ============

#[tokio::test]
async fn every_response_has_request_id() {
    let server = create_test_server();

    for response in [
        server.get("/health").await,
        server.get("/does-not-exist.mp3").await,
        server.post("/v1/tts").json(&json!({"text": ""})).await,
    ] {
        let id = response.header(REQUEST_ID_HEADER);
        assert!(!id.is_empty());
    }
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let server = create_test_server();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("client-trace-7"),
        )
        .await;

    assert_eq!(response.header(REQUEST_ID_HEADER), "client-trace-7");
}
