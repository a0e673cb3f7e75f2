//! Voice value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Requested speaker gender for synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Male,
    #[default]
    Female,
}

impl Voice {
    /// Resolve an optional, caller-supplied voice
    ///
    /// Anything other than `male` or `female` (in any case) resolves to
    /// `Female` instead of failing.
    #[must_use]
    pub fn lenient(input: Option<&str>) -> Self {
        match input.map(|value| value.trim().to_lowercase()).as_deref() {
            Some("male") => Self::Male,
            _ => Self::Female,
        }
    }

    /// Lower-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_voices_are_kept() {
        assert_eq!(Voice::lenient(Some("male")), Voice::Male);
        assert_eq!(Voice::lenient(Some("female")), Voice::Female);
        assert_eq!(Voice::lenient(Some(" MALE ")), Voice::Male);
    }

    #[test]
    fn unknown_voice_falls_back_to_female() {
        assert_eq!(Voice::lenient(Some("robot")), Voice::Female);
        assert_eq!(Voice::lenient(Some("")), Voice::Female);
    }

    #[test]
    fn missing_voice_is_female() {
        assert_eq!(Voice::lenient(None), Voice::Female);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Voice::Male).unwrap(), "\"male\"");
        assert_eq!(Voice::Female.to_string(), "female");
    }
}
