//! Google Translate TTS provider
//!
//! Speaks text through the public `translate_tts` endpoint (the one gTTS
//! uses). The endpoint rejects inputs longer than 100 characters, so text is
//! split into chunks and the returned MP3 segments are concatenated. MP3
//! frames are self-delimiting, so the concatenation plays as one stream.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use domain::{Language, Voice};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, instrument, warn};

use super::{Stage, http_client, upstream_error};
use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

/// Longest input the endpoint accepts per request
pub const MAX_CHUNK_CHARS: usize = 100;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Characters after which a chunk may end
const PUNCTUATION: &[char] = &[
    '.', '!', '?', ';', ':', ',', '\n', '。', '、', '！', '？', '；', '：', '，', '।',
];

/// Text-to-speech through Google Translate
#[derive(Debug, Clone)]
pub struct GoogleTranslateTtsProvider {
    client: Client,
    base_url: String,
}

impl GoogleTranslateTtsProvider {
    /// Create a new provider from the speech configuration
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        Ok(Self {
            client: http_client(config.timeout_ms)?,
            base_url: config.google_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the MP3 segment for one chunk
    ///
    /// `idx`, `total` and `textlen` mirror what the Translate web client sends.
    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: Language,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, SpeechError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.code()),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, Stage::Synthesis).await);
        }

        Ok(response.bytes().await?)
    }
}

/// Split text into chunks of at most [`MAX_CHUNK_CHARS`] characters
///
/// Chunks end at punctuation where possible, then at whitespace. A run with
/// neither (long words, CJK text) is cut at the character limit.
pub fn split_into_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for segment in punctuated_segments(text) {
        for piece in bounded_pieces(segment) {
            let joined_len = if current.is_empty() {
                piece.chars().count()
            } else {
                current.chars().count() + 1 + piece.chars().count()
            };

            if joined_len > MAX_CHUNK_CHARS && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Split on punctuation, keeping the mark with the preceding segment
fn punctuated_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(PUNCTUATION)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Break a segment into pieces no longer than the chunk limit
fn bounded_pieces(segment: &str) -> Vec<String> {
    if segment.chars().count() <= MAX_CHUNK_CHARS {
        return vec![segment.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for word in segment.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > MAX_CHUNK_CHARS {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            pieces.extend(
                chars
                    .chunks(MAX_CHUNK_CHARS)
                    .map(|c| c.iter().collect::<String>()),
            );
            continue;
        }

        let joined_len = if current.is_empty() {
            word_len
        } else {
            current.chars().count() + 1 + word_len
        };
        if joined_len > MAX_CHUNK_CHARS {
            pieces.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[async_trait]
impl TextToSpeech for GoogleTranslateTtsProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        _voice: Voice,
    ) -> Result<AudioData, SpeechError> {
        let chunks = split_into_chunks(text);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        debug!(chunks = chunks.len(), "Synthesizing speech with Google TTS");

        let total = chunks.len();
        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend_from_slice(&self.fetch_chunk(chunk, language, idx, total).await?);
        }

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Provider returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio.len(), "Speech synthesis complete");
        Ok(AudioData::new(audio.freeze(), AudioFormat::Mp3))
    }

    async fn is_available(&self) -> bool {
        match self
            .client
            .get(&self.base_url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => !response.status().is_server_error(),
            Err(e) => {
                warn!(error = %e.without_url(), "Google TTS availability probe failed");
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        "google-translate-tts"
    }
}
