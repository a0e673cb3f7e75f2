//! Supported language value object

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A language accepted for both synthesis and recognition
///
/// The set is fixed at compile time and never changes while the process runs.
/// Serializes as its ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Hindi,
    Japanese,
}

impl Language {
    /// Every supported language, in display order
    pub const ALL: [Self; 6] = [
        Self::English,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Hindi,
        Self::Japanese,
    ];

    /// Language used when a request does not name one
    pub const DEFAULT: Self = Self::English;

    /// ISO 639-1 code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Hindi => "hi",
            Self::Japanese => "ja",
        }
    }

    /// Human-readable English name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Hindi => "Hindi",
            Self::Japanese => "Japanese",
        }
    }

    /// Parse a language code, ignoring surrounding whitespace and case
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedLanguage` if the code is not in the set.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let normalized = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|language| language.code() == normalized)
            .ok_or_else(|| DomainError::UnsupportedLanguage(input.trim().to_string()))
    }

    /// Parse an optional language code, falling back to [`Language::DEFAULT`]
    pub fn parse_or_default(input: Option<&str>) -> Result<Self, DomainError> {
        input.map_or(Ok(Self::DEFAULT), Self::parse)
    }

    /// Code → display name map of every supported language
    #[must_use]
    pub fn supported() -> BTreeMap<&'static str, &'static str> {
        Self::ALL
            .into_iter()
            .map(|language| (language.code(), language.display_name()))
            .collect()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}
