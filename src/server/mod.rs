//! HTTP server implementation
//!
//! The config endpoint the submitter talks to, built on Axum.

pub mod app;
pub mod auth;
pub mod handlers;
pub mod store;

pub use app::{AppState, create_app, create_app_with_state};
pub use store::ConfigStore;
