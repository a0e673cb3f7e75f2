//! Values exchanged with speech providers

use std::time::Duration;

use bytes::Bytes;
use domain::Language;

pub use domain::AudioFormat;

/// Encoded audio plus its container format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    bytes: Bytes,
    format: AudioFormat,
}

impl AudioData {
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>, format: AudioFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Filename to present the audio under in a multipart upload
    #[must_use]
    pub fn upload_name(&self) -> String {
        format!("audio.{}", self.format.extension())
    }

    /// Take the bytes out as an owned buffer
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        Vec::from(self.bytes)
    }
}

/// Text recognized in an audio clip
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub text: String,
    /// Language the recognizer was told to expect
    pub language: Language,
    /// Length of the clip, when the provider reports it
    pub duration: Option<Duration>,
}

impl Transcription {
    #[must_use]
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
            duration: None,
        }
    }

    /// True when nothing but whitespace was recognized
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
