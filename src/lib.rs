//! cweb-config - guild configuration submitter
//!
//! Sends the text of a guild's configuration editor to the web panel's
//! config endpoint and shows exactly one status indicator for the result.
//!
//! # Features
//!
//! - **Submitter**: `PUT /api/{gid}/config` with `{"newConfig": "<text>"}`
//! - **Injected collaborators**: the editor and the status display are traits
//! - **Recognized errors**: 400 and 403 map to their own indicators, or can be
//!   folded into the generic error
//! - **Single-flight**: one submission per submitter at a time
//! - **Server Mode**: an Axum implementation of the endpoint for local use
//!
//! # Usage
//!
//! ## Submit Mode
//!
//! ```bash
//! cweb-config --gid 1234 --file guild.toml --token secret
//! ```
//!
//! ## Server Mode
//!
//! ```bash
//! cweb-config server --port 4417 --host 127.0.0.1
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use cweb_config::{ConfigSubmitter, IndicatorBoard, MemoryEditor, Settings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::default();
//! let editor = MemoryEditor::new("prefix = \"!\"");
//! let board = IndicatorBoard::new();
//!
//! let submitter = ConfigSubmitter::new(&settings.client, editor, board.clone())?;
//! let outcome = submitter.submit("1234").await?;
//! println!("{outcome:?}: {:?}", board.visible());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod submit;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, Overrides, Settings};
pub use error::{Error, Result};
pub use submit::{
    ConfigSubmitter, EditorSource, Indicator, IndicatorBoard, MemoryEditor, RecognizedError,
    RecognizedErrors, StatusDisplay, SubmitOutcome,
};
pub use types::{ApiMessage, ConfigUpdate, PingResponse, StoredConfig};
