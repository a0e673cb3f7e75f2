//! API error handling
//!
//! Every failure leaves the service as `{error, code}` with a fixed status
//! per variant. Provider failures echo their message unless internal error
//! exposure is switched off.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Message returned for service errors when details are hidden
const GENERIC_SERVICE_ERROR: &str = "An internal error occurred";

/// Configure whether provider and storage error messages reach the caller.
///
/// When `false`, every `service_error` response carries a generic message
/// and the real cause is only logged.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("File not found")]
    NotFound,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    ServiceError(String),
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::UnsupportedLanguage(_) => "unsupported_language",
            Self::NotFound => "not_found",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::ServiceError(_) => "service_error",
        }
    }

    /// Build an error from a rejected request body
    fn from_rejection(status: StatusCode, body_text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(body_text)
        } else {
            Self::InvalidInput(body_text)
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"error": "Invalid input: text must not be empty", "code": "invalid_input"}))]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::ServiceError(msg) => {
                error!(error = %msg, "Request failed");
                if should_expose_details() {
                    msg.clone()
                } else {
                    GENERIC_SERVICE_ERROR.to_string()
                }
            },
            other => {
                warn!(code = other.code(), error = %other, "Request rejected");
                other.to_string()
            },
        };

        let body = ErrorResponse {
            error: message,
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput(msg) => Self::InvalidInput(msg),
            DomainError::UnsupportedLanguage(code) => Self::UnsupportedLanguage(code),
            DomainError::InvalidArtifactId(_) => Self::NotFound,
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => e.into(),
            ApplicationError::NotFound(_) => Self::NotFound,
            ApplicationError::ExternalService(msg) => Self::ServiceError(msg),
            other @ (ApplicationError::Storage(_) | ApplicationError::Configuration(_)) => {
                Self::ServiceError(other.to_string())
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::from_rejection(err.status(), err.body_text())
    }
}
