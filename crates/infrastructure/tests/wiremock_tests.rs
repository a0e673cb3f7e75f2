//! Integration tests for the speech pipeline against mocked providers
//!
//! Wires the real adapter, artifact store and speech service together with
//! wiremock standing in for Google Translate TTS and OpenAI Whisper.

#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::{ApplicationError, SpeechService, SpeechServiceConfig};
use domain::{
    ArtifactKind, AudioFormat, DomainError, GenerationRequest, RecognitionRequest,
    SpeechToSpeechRequest,
};
use infrastructure::{AppConfig, FilesystemArtifactStore, SpeechAdapter};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MP3_FRAME: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

fn config_for(mock_server: &MockServer, tts_provider: &str) -> AppConfig {
    AppConfig::from_toml(&format!(
        r#"
        [speech]
        tts_provider = "{tts_provider}"
        openai_api_key = "sk-test"
        openai_base_url = "{uri}"
        google_base_url = "{uri}"
        timeout_ms = 5000
        "#,
        uri = mock_server.uri()
    ))
    .expect("valid config")
}

async fn service_for(mock_server: &MockServer) -> (TempDir, Arc<SpeechService>) {
    service_with_provider(mock_server, "google").await
}

async fn service_with_provider(
    mock_server: &MockServer,
    tts_provider: &str,
) -> (TempDir, Arc<SpeechService>) {
    let config = config_for(mock_server, tts_provider);
    let dir = TempDir::new().expect("temp dir");
    let store = FilesystemArtifactStore::open(dir.path().join("audio"))
        .await
        .expect("open store");
    let adapter = SpeechAdapter::new(&config.speech).expect("adapter");

    let service = SpeechService::new(
        Arc::new(adapter),
        Arc::new(store),
        SpeechServiceConfig {
            public_base_url: "https://speech.example.com/".to_string(),
            max_text_chars: config.speech.effective_max_text_chars(),
        },
    );
    (dir, Arc::new(service))
}

fn audio_files(dir: &TempDir) -> Vec<String> {
    std::fs::read_dir(dir.path().join("audio"))
        .expect("read dir")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

async fn mount_google(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(MP3_FRAME.to_vec()))
        .mount(mock_server)
        .await;
}

async fn mount_whisper(mock_server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": text })))
        .mount(mock_server)
        .await;
}

// ============================================================================
// Synthesis
// ============================================================================

#[tokio::test]
async fn synthesis_stores_mp3_and_builds_public_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("tl", "ja"))
        .and(query_param("client", "tw-ob"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(MP3_FRAME.to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;
    let (dir, service) = service_for(&mock_server).await;

    let request = GenerationRequest::validate(Some("こんにちは"), Some("ja"), None).expect("valid");
    let outcome = service.synthesize(request).await.expect("synthesized");

    let file_name = outcome.artifact.file_name();
    assert!(file_name.starts_with("audio_"));
    assert!(file_name.ends_with(".mp3"));
    assert_eq!(
        outcome.audio_url,
        format!("https://speech.example.com/{file_name}")
    );
    assert_eq!(audio_files(&dir), vec![file_name.clone()]);

    let fetched = service.fetch_artifact(&file_name).await.expect("fetched");
    assert_eq!(fetched.data, MP3_FRAME.to_vec());
    assert_eq!(fetched.mime_type(), "audio/mpeg");
}

#[tokio::test]
async fn openai_synthesis_rejects_text_over_its_input_limit() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(MP3_FRAME.to_vec()))
        .expect(0)
        .mount(&mock_server)
        .await;
    let (dir, service) = service_with_provider(&mock_server, "openai").await;

    let text = "a".repeat(4500);
    let request = GenerationRequest::validate(Some(&text), Some("en"), None).expect("valid");
    let err = service.synthesize(request).await.expect_err("too long");

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidInput(_))
    ));
    assert!(audio_files(&dir).is_empty());
}

#[tokio::test]
async fn long_text_is_fetched_in_chunks() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(MP3_FRAME.to_vec()))
        .expect(3)
        .mount(&mock_server)
        .await;
    let (_dir, service) = service_for(&mock_server).await;

    let sentence = "This sentence is long enough to need its own request to the service. ";
    let text = sentence.repeat(3);
    let request = GenerationRequest::validate(Some(&text), Some("en"), None).expect("valid");
    let outcome = service.synthesize(request).await.expect("synthesized");

    assert_eq!(outcome.artifact.size_bytes, (MP3_FRAME.len() * 3) as u64);
}

#[tokio::test]
async fn provider_error_leaves_no_artifact() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;
    let (dir, service) = service_for(&mock_server).await;

    let request = GenerationRequest::validate(Some("Hello"), None, None).expect("valid");
    let err = service.synthesize(request).await.expect_err("rate limited");

    assert!(err.to_string().contains("Rate limit exceeded"));
    assert!(audio_files(&dir).is_empty());
}

// ============================================================================
// Recognition
// ============================================================================

#[tokio::test]
async fn recognition_removes_staged_upload_from_disk() {
    let mock_server = MockServer::start().await;
    mount_whisper(&mock_server, "Bonjour tout le monde").await;
    let (dir, service) = service_for(&mock_server).await;

    let request =
        RecognitionRequest::validate(b"OggS....".to_vec(), AudioFormat::Ogg, Some("fr")).expect("valid");
    let outcome = service.transcribe(request).await.expect("transcribed");

    assert_eq!(outcome.text, "Bonjour tout le monde");
    assert!(audio_files(&dir).is_empty());
}

#[tokio::test]
async fn failed_recognition_removes_staged_upload_from_disk() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;
    let (dir, service) = service_for(&mock_server).await;

    let request =
        RecognitionRequest::validate(vec![1, 2, 3], AudioFormat::Wav, None).expect("valid");
    assert!(service.transcribe(request).await.is_err());
    assert!(audio_files(&dir).is_empty());
}

// ============================================================================
// Speech-to-speech
// ============================================================================

#[tokio::test]
async fn speech_to_speech_keeps_only_the_synthesized_audio() {
    let mock_server = MockServer::start().await;
    mount_whisper(&mock_server, "Guten Morgen").await;
    mount_google(&mock_server).await;
    let (dir, service) = service_for(&mock_server).await;

    let request = SpeechToSpeechRequest::validate(
        vec![1, 2, 3],
        AudioFormat::Webm,
        Some("de"),
        Some("es"),
    )
    .expect("valid");
    let outcome = service.speech_to_speech(request).await.expect("pipeline");

    assert_eq!(outcome.source_text, "Guten Morgen");
    assert_eq!(outcome.artifact.id.kind(), ArtifactKind::Speech);
    assert_eq!(audio_files(&dir), vec![outcome.artifact.file_name()]);
}
