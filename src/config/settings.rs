//! Configuration settings
//!
//! Settings are read from a TOML file and then overridden by environment
//! variables. Every section is optional and falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::submit::RecognizedError;

// Helper functions for serde defaults
fn default_true() -> bool {
    true
}

fn default_max_body_size() -> usize {
    1024 * 1024
}

fn default_base_url() -> String {
    "http://127.0.0.1:4417".to_string()
}

fn default_user_agent() -> String {
    crate::utils::version::user_agent()
}

fn default_recognized_errors() -> Vec<RecognizedError> {
    vec![RecognizedError::MalformedConfig, RecognizedError::NotEditor]
}

fn default_host() -> String {
    "::".to_string()
}

fn default_port() -> u16 {
    4417
}

/// Main configuration settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Submitter configuration
    #[serde(default)]
    pub client: ClientSettings,
    /// Config endpoint configuration
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Tokens allowed to read and write guild configs
    #[serde(default)]
    pub access: Vec<AccessGrant>,
}

/// Submitter (HTTP client) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Dashboard base URL; `/api/{gid}/config` is appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every update
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Failure codes that get their own indicator
    #[serde(default = "default_recognized_errors")]
    pub recognized_errors: Vec<RecognizedError>,
}

/// Text format the endpoint requires `newConfig` to parse as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// Accept any text
    #[default]
    Any,
    /// Must be a JSON document
    Json,
    /// Must be a TOML document
    Toml,
}

/// Config endpoint (HTTP server) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    /// Maximum request body size
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Validation applied to submitted config text
    #[serde(default)]
    pub config_format: ConfigFormat,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error). Each mode has its own
    /// fallback when unset.
    #[serde(default)]
    pub level: Option<String>,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

/// A bearer token and the guilds it can act on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessGrant {
    /// Display name used in logs
    #[serde(default)]
    pub name: String,
    /// Bearer token presented in the `Authorization` header
    pub token: String,
    /// Guilds this token is a member of
    #[serde(default)]
    pub guilds: Vec<GuildGrant>,
}

/// Membership of one guild with its permission bits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuildGrant {
    /// Guild id
    pub id: String,
    /// Discord-style permission bit set
    #[serde(default)]
    pub permissions: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            request_timeout: None,
            user_agent: default_user_agent(),
            recognized_errors: default_recognized_errors(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
            max_body_size: default_max_body_size(),
            config_format: ConfigFormat::default(),
        }
    }
}

impl LoggingSettings {
    /// Configured level, or `fallback` when none is set
    pub fn level_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.level.as_deref().unwrap_or(fallback)
    }
}

impl ClientSettings {
    /// Request timeout as a [`Duration`], if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_secs)
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables on top of the defaults
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Override fields with any environment variables that are set
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(base_url) = std::env::var("CWEB_BASE_URL") {
            self.client.base_url = base_url;
        }

        if let Ok(token) = std::env::var("CWEB_TOKEN") {
            self.client.token = Some(token);
        }

        if let Ok(timeout) = std::env::var("CWEB_REQUEST_TIMEOUT") {
            let secs: u64 = timeout.parse().map_err(|e| {
                crate::Error::config("request_timeout", &format!("Invalid timeout: {}", e))
            })?;
            self.client.request_timeout = Some(secs);
        }

        if let Ok(host) = std::env::var("CWEB_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("CWEB_SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| crate::Error::config("port", &format!("Invalid port: {}", e)))?;
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = Some(level);
        }

        if let Ok(verbose) = std::env::var("VERBOSE") {
            self.logging.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(self)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::config(
                "port",
                "Invalid server port: cannot be 0",
            ));
        }

        if let Some(level) = &self.logging.level
            && !matches!(
                level.to_lowercase().as_str(),
                "trace" | "debug" | "info" | "warn" | "error"
            )
        {
            return Err(crate::Error::config(
                "log_level",
                &format!("Invalid log level: {}", level),
            ));
        }

        match url::Url::parse(&self.client.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(crate::Error::config(
                    "base_url",
                    &format!("Unsupported scheme '{}'", url.scheme()),
                ));
            }
            Err(e) => {
                return Err(crate::Error::config(
                    "base_url",
                    &format!("Invalid base URL '{}': {}", self.client.base_url, e),
                ));
            }
        }

        if self.client.request_timeout == Some(0) {
            return Err(crate::Error::config(
                "request_timeout",
                "Invalid request timeout: cannot be 0",
            ));
        }

        if let Some(grant) = self.access.iter().find(|grant| grant.token.is_empty()) {
            return Err(crate::Error::config(
                "access",
                &format!("Access grant '{}' has an empty token", grant.name),
            ));
        }

        Ok(())
    }
}
