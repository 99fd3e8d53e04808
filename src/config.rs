//! Application configuration: optional TOML file plus environment.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Top-level configuration.
///
/// Every key is optional; a missing file yields [`AppConfig::default`].
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
///
/// [provider]
/// model = "llama-3.3-70b-versatile"
/// api_key_env = "GROQ_API_KEY"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// HTTP listener settings.
    server: ServerSettings,
    /// Question provider settings.
    provider: ProviderSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_", into)]
pub struct ServerSettings {
    /// Bind address.
    host: String,
    /// Bind port.
    port: u16,
    /// Seconds a session may sit untouched before it is evicted.
    session_idle_secs: u64,
    /// Upper bound on live sessions; the least recently used one is evicted past it.
    max_sessions: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            session_idle_secs: 30 * 60,
            max_sessions: 10_000,
        }
    }
}

/// Remote model endpoint and credential lookup.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_", into)]
pub struct ProviderSettings {
    /// Base URL of an OpenAI-compatible API.
    api_base: String,
    /// Model identifier.
    model: String,
    /// Name of the environment variable holding the API key.
    api_key_env: String,
    /// Request timeout; `None` keeps the HTTP client default.
    request_timeout_secs: Option<u64>,
}

impl ServerSettings {
    /// Session idle limit as a [`Duration`].
    pub fn session_idle_limit(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ProviderSettings {
    /// Reads the API key from the configured environment variable.
    ///
    /// Unset and blank values both count as missing.
    pub fn credential(&self) -> Option<String> {
        self.credential_from(|variable| std::env::var(variable).ok())
    }

    /// Reads the API key through `lookup`, which maps a variable name to its value.
    #[instrument(skip(self, lookup), fields(variable = %self.api_key_env))]
    pub fn credential_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let key = lookup(&self.api_key_env)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if key.is_none() {
            warn!("API key environment variable not set");
        }
        key
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(model = %config.provider.model, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
