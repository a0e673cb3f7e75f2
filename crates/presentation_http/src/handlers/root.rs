//! Service banner and language listing

use std::collections::BTreeMap;

use axum::Json;
use domain::Language;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name reported by the banner
pub const SERVICE_NAME: &str = "SpeechGate";

/// Service banner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "service": "SpeechGate",
    "version": "0.2.0",
    "message": "Text-to-speech and speech-to-text API",
    "languages": {"de": "German", "en": "English"}
}))]
pub struct ServiceInfoResponse {
    pub service: String,
    pub version: String,
    pub message: String,
    /// Supported language codes mapped to their names
    pub languages: BTreeMap<String, String>,
}

/// Describe the service and its supported languages
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service banner", body = ServiceInfoResponse)
    )
)]
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Text-to-speech and speech-to-text API".to_string(),
        languages: Language::supported()
            .into_iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect(),
    })
}

/// A supported language
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LanguageInfo {
    /// ISO 639-1 code
    pub code: String,
    pub name: String,
}

/// Supported languages
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
    /// Code used when a request omits the language
    pub default: String,
}

/// List supported languages
#[utoipa::path(
    get,
    path = "/v1/languages",
    tag = "system",
    responses(
        (status = 200, description = "Supported languages", body = LanguagesResponse)
    )
)]
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: Language::ALL
            .into_iter()
            .map(|language| LanguageInfo {
                code: language.code().to_string(),
                name: language.display_name().to_string(),
            })
            .collect(),
        default: Language::DEFAULT.code().to_string(),
    })
}
