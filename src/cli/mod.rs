//! Command-line entry points
//!
//! `submit` is the default mode (no subcommand); `server` runs the config
//! endpoint.

pub mod server;
pub mod submit;
