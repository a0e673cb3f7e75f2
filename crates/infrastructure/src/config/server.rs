//! HTTP server configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Structured JSON, one object per event
    Json,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally visible hostname used in audio links (e.g. behind a proxy)
    #[serde(default)]
    pub public_host: Option<String>,

    /// Scheme used together with `public_host`
    #[serde(default = "default_public_scheme")]
    pub public_scheme: String,

    /// Allowed CORS origins (empty = allow all)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default)]
    pub log_format: LogFormat,

    /// Maximum body size for audio uploads in bytes (default: 10MB)
    #[serde(default = "default_max_body_audio")]
    pub max_body_size_audio_bytes: usize,

    /// Maximum body size for JSON requests in bytes (default: 1MB)
    #[serde(default = "default_max_body_json")]
    pub max_body_size_json_bytes: usize,

    /// Include upstream error messages in 500 responses
    #[serde(default = "default_true")]
    pub expose_internal_errors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_public_scheme() -> String {
    "https".to_string()
}

const fn default_shutdown_timeout() -> u64 {
    30
}

const fn default_max_body_audio() -> usize {
    10 * 1024 * 1024 // 10MB
}

const fn default_max_body_json() -> usize {
    1024 * 1024 // 1MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_host: None,
            public_scheme: default_public_scheme(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            log_format: LogFormat::default(),
            max_body_size_audio_bytes: default_max_body_audio(),
            max_body_size_json_bytes: default_max_body_json(),
            expose_internal_errors: true,
        }
    }
}

impl ServerConfig {
    /// Address to bind the listener to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL that audio links are built on
    ///
    /// Uses `public_host` when set, otherwise the bind address with an
    /// unspecified host shown as `localhost`.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        match self
            .public_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
        {
            Some(host) => format!(
                "{}://{}",
                self.public_scheme,
                host.trim_end_matches('/')
            ),
            None => {
                let host = match self.host.as_str() {
                    "0.0.0.0" | "::" | "[::]" => "localhost",
                    other => other,
                };
                format!("http://{host}:{}", self.port)
            },
        }
    }
}
