//! Application services - Use case implementations

mod health_service;
mod scoped_artifact;
mod speech_service;

pub use health_service::{
    DEFAULT_CHECK_TIMEOUT, Dependency, HealthReport, HealthService, ServiceHealth,
};
pub use scoped_artifact::ScopedArtifact;
pub use speech_service::{
    FetchedArtifact, RecognitionOutcome, SpeechService, SpeechServiceConfig,
    SpeechToSpeechOutcome, SynthesisOutcome,
};
