//! Port definitions - Interfaces for external adapters
//!
//! Ports define the contracts that infrastructure adapters must fulfill.

mod artifact_store;
mod speech_port;

pub use artifact_store::ArtifactStore;
#[cfg(test)]
pub use artifact_store::MockArtifactStore;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{SpeechPort, SynthesisResult, TranscriptionResult};
