//! Clients for the external speech services SpeechGate glues together
//!
//! - [`GoogleTranslateTtsProvider`]: keyless synthesis through the Translate
//!   web endpoint, chunked at 100 characters
//! - [`OpenAISpeechProvider`]: Whisper recognition and `/audio/speech`
//!   synthesis
//!
//! Both sit behind the [`SpeechToText`] and [`TextToSpeech`] traits so the
//! infrastructure layer can pick a backend from [`SpeechConfig`].

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{SpeechConfig, TtsProvider};
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::{GoogleTranslateTtsProvider, OpenAISpeechProvider};
pub use types::{AudioData, AudioFormat, Transcription};
