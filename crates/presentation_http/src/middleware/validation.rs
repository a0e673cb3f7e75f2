//! Request validation
//!
//! Provides a `ValidatedJson` extractor that parses and validates request
//! bodies, rejecting with the same error shape as the handlers.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

use crate::error::ApiError;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("{0}")]
    ValidationFailed(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::JsonError(rejection) => rejection.into(),
            ValidationError::ValidationFailed(msg) => Self::InvalidInput(msg),
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// A JSON extractor that also validates the request body
///
/// Malformed JSON and failed field rules become `invalid_input`; bodies over
/// the route's size limit become `payload_too_large`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value.validate().map_err(|e| {
            let mut errors: Vec<String> = e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error
                                .message
                                .as_ref()
                                .map_or_else(|| error.code.to_string(), ToString::to_string)
                        )
                    })
                })
                .collect();
            errors.sort();

            ValidationError::ValidationFailed(errors.join("; "))
        })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        extract::DefaultBodyLimit,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct TestRequest {
        #[validate(length(min = 1, message = "must not be empty"))]
        text: Option<String>,
    }

    async fn handler(ValidatedJson(req): ValidatedJson<TestRequest>) -> String {
        req.text.unwrap_or_default()
    }

    fn app() -> Router {
        Router::new()
            .route("/", post(handler))
            .layer(DefaultBodyLimit::max(64))
    }

    async fn send(body: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn valid_request_passes() {
        let (status, _) = send(r#"{"text": "hello"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_optional_field_passes() {
        let (status, _) = send("{}").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn failed_rule_is_invalid_input() {
        let (status, body) = send(r#"{"text": ""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");
        assert!(body["error"].as_str().unwrap().contains("text: must not be empty"));
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_input() {
        let (status, body) = send("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let long = "a".repeat(200);
        let (status, body) = send(&format!(r#"{{"text": "{long}"}}"#)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "payload_too_large");
    }
}
