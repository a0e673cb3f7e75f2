//! Domain entities - Request-scoped objects and stored artifacts

mod audio_artifact;
mod generation_request;
mod recognition_request;
mod speech_to_speech_request;

pub use audio_artifact::AudioArtifact;
pub use generation_request::GenerationRequest;
pub use recognition_request::RecognitionRequest;
pub use speech_to_speech_request::SpeechToSpeechRequest;
