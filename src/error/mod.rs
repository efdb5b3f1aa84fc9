//! Error handling
//!
//! This module defines the error type used throughout the library.

pub mod types;

pub use types::{Error, Result};
