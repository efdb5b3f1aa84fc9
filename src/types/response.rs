//! Response type definitions
//!
//! Every answer from the config endpoint is an [`ApiMessage`], except the
//! read route and the health check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status message returned by the config endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// HTTP status code, repeated in the body
    pub code: u16,
    /// Human readable message
    pub message: String,
}

impl ApiMessage {
    /// Create a new message
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Stored configuration of one guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// Guild id
    pub gid: String,
    /// Configuration text; empty when nothing was ever stored
    pub config: String,
    /// Time of the last update
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredConfig {
    /// Placeholder for a guild without a stored config
    pub fn empty(gid: impl Into<String>) -> Self {
        Self {
            gid: gid.into(),
            config: String::new(),
            updated_at: None,
        }
    }
}

/// Ping response for health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    /// Server uptime in seconds
    pub server_uptime: u64,

    /// Server version
    pub version: String,
}

impl PingResponse {
    /// Create a new ping response
    pub fn new(server_uptime: u64, version: impl Into<String>) -> Self {
        Self {
            server_uptime,
            version: version.into(),
        }
    }
}
