//! Error types
//!
//! Library-level error enum shared by the submitter, the config endpoint
//! and the settings loader.

use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// The editor could not produce its current text
    #[error("Editor '{source_name}' could not be read: {message}")]
    Editor {
        /// Which editor failed (file path, "stdin", ...)
        source_name: String,
        /// Error message describing the failure
        message: String,
    },

    /// A submission is already outstanding on this submitter
    #[error("A configuration update for guild {gid} is already in flight")]
    SubmissionInFlight {
        /// Guild the rejected call targeted
        gid: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an editor error
    pub fn editor<S: Into<String>>(source_name: S, message: S) -> Self {
        Self::Editor {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create an in-flight rejection for `gid`
    pub fn in_flight(gid: impl Into<String>) -> Self {
        Self::SubmissionInFlight { gid: gid.into() }
    }

    /// Whether the error came from the single-flight guard
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::SubmissionInFlight { .. })
    }
}
