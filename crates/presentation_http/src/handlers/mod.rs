//! HTTP request handlers

pub mod files;
pub mod health;
pub mod root;
pub mod speech_to_speech;
pub mod stt;
pub mod tts;
pub mod upload;
