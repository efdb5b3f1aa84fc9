//! Configuration management
//!
//! This module handles loading and managing configuration settings
//! for both the submitter and the config endpoint.

pub mod loader;
pub mod settings;

pub use loader::{ConfigLoader, Overrides};
pub use settings::{
    AccessGrant, ClientSettings, ConfigFormat, GuildGrant, LoggingSettings, ServerSettings,
    Settings,
};

// Serializes tests that read or write process environment variables
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
