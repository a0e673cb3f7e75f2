//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field is missing, empty, or out of bounds
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Language code is not part of the supported set
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A filename does not name an artifact
    #[error("Invalid artifact id: {0}")]
    InvalidArtifactId(String),
}

impl DomainError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
