//! Speech provider implementations
//!
//! Concrete `SpeechToText` and `TextToSpeech` clients plus the HTTP plumbing
//! they share.

pub mod google;
pub mod openai;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

pub use google::GoogleTranslateTtsProvider;
pub use openai::OpenAISpeechProvider;

use crate::error::SpeechError;

/// Longest upstream error body quoted in an error message
const MAX_QUOTED_BODY_CHARS: usize = 200;

/// Which kind of call a failed response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Transcription,
    Synthesis,
}

impl Stage {
    fn failed(self, message: String) -> SpeechError {
        match self {
            Self::Transcription => SpeechError::TranscriptionFailed(message),
            Self::Synthesis => SpeechError::SynthesisFailed(message),
        }
    }
}

/// Build an HTTP client with the configured request timeout
pub(crate) fn http_client(timeout_ms: u64) -> Result<Client, SpeechError> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(|e| SpeechError::Configuration(format!("Failed to create HTTP client: {e}")))
}

/// Error envelope used by OpenAI-compatible APIs
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Convert a non-success response into a `SpeechError`
///
/// Throttling becomes `RateLimited`. A JSON error envelope contributes its
/// message, anything else is quoted with the status line.
pub(crate) async fn upstream_error(response: Response, stage: Stage) -> SpeechError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    decode_error(status, &body, stage)
}

fn decode_error(status: StatusCode, body: &str, stage: Stage) -> SpeechError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let throttled = status == StatusCode::TOO_MANY_REQUESTS
        || envelope
            .as_ref()
            .is_some_and(|e| e.error.code.as_deref() == Some("rate_limit_exceeded"));
    if throttled {
        return SpeechError::RateLimited;
    }

    if let Some(envelope) = envelope {
        return stage.failed(envelope.error.message);
    }

    let quoted: String = body.trim().chars().take(MAX_QUOTED_BODY_CHARS).collect();
    if quoted.is_empty() {
        stage.failed(format!("HTTP {status}"))
    } else {
        stage.failed(format!("HTTP {status}: {quoted}"))
    }
}
