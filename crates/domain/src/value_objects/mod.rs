//! Value Objects - Immutable, identity-less domain primitives

mod artifact_id;
mod audio_format;
mod language;
mod voice;

pub use artifact_id::{ArtifactId, ArtifactKind};
pub use audio_format::AudioFormat;
pub use language::Language;
pub use voice::Voice;
