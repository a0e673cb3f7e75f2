//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `storage`: artifact store settings
//!
//! Speech provider settings live in [`ai_speech::SpeechConfig`].

mod server;
mod storage;

use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use server::{LogFormat, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "SPEECHGATE";

/// Hostname variable set by the Render hosting platform
pub const RENDER_HOSTNAME_VAR: &str = "RENDER_EXTERNAL_HOSTNAME";

/// Conventional OpenAI key variable
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Artifact storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Speech provider configuration
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    ///
    /// Environment variables use the `SPEECHGATE` prefix and `__` between
    /// path segments, e.g. `SPEECHGATE_SERVER__PORT=8080`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = Self::defaults()?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_fallbacks(
            std::env::var(RENDER_HOSTNAME_VAR).ok(),
            std::env::var(OPENAI_API_KEY_VAR).ok(),
        );
        Ok(config)
    }

    /// Parse configuration from a TOML document layered over the defaults
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        Self::defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)
    }

    /// Fill unset values from well-known platform variables
    pub fn apply_fallbacks(&mut self, render_hostname: Option<String>, openai_api_key: Option<String>) {
        if self.server.public_host.is_none() {
            if let Some(host) = render_hostname.filter(|h| !h.trim().is_empty()) {
                debug!(host = %host, "Using platform hostname for public URLs");
                self.server.public_host = Some(host);
            }
        }

        if !self.speech.has_openai_key() {
            if let Some(key) = openai_api_key.filter(|k| !k.trim().is_empty()) {
                self.speech.openai_api_key = Some(key);
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.max_body_size_audio_bytes == 0 || self.server.max_body_size_json_bytes == 0
        {
            return Err("Body size limits must be greater than 0".to_string());
        }
        self.speech.validate()
    }
}
