//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware.

use crate::{
    config::Settings,
    server::{auth::AccessTable, store::ConfigStore},
};
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Guild configurations
    pub store: Arc<ConfigStore>,
    /// Known bearer tokens
    pub access: Arc<AccessTable>,
    /// Application settings
    pub settings: Arc<Settings>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// State with an empty store
    pub fn new(settings: Settings) -> Self {
        Self::with_store(settings, Arc::new(ConfigStore::new()))
    }

    /// State around an existing store
    pub fn with_store(settings: Settings, store: Arc<ConfigStore>) -> Self {
        Self {
            store,
            access: Arc::new(AccessTable::from_grants(&settings.access)),
            settings: Arc::new(settings),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Create the main Axum application with routes and middleware
pub fn create_app(settings: Settings) -> Router {
    create_app_with_state(AppState::new(settings))
}

/// Create the application around prepared state
pub fn create_app_with_state(state: AppState) -> Router {
    let max_body_size = state.settings.server.max_body_size;
    let enable_cors = state.settings.server.enable_cors;

    let router = Router::new()
        .route(
            "/api/{gid}/config",
            get(super::handlers::get_config)
                .put(super::handlers::update_config)
                .post(super::handlers::update_config),
        )
        .route("/ping", get(super::handlers::ping))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_size)),
        );

    let router = if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
