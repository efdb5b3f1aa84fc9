//! HTTP request handlers
//!
//! Implementation of the config endpoint and the health check.

use crate::{
    config::{AccessGrant, ConfigFormat},
    server::{app::AppState, auth::can_edit},
    types::{ApiMessage, ConfigUpdate, PingResponse, StoredConfig},
    utils::version,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};

/// Reply: status plus the same code and a message in the body
pub type ApiReply = (StatusCode, Json<ApiMessage>);

fn reply(status: StatusCode, message: impl Into<String>) -> ApiReply {
    (status, Json(ApiMessage::new(status.as_u16(), message)))
}

fn authenticate<'a>(
    state: &'a AppState,
    headers: &HeaderMap,
) -> Result<&'a AccessGrant, ApiReply> {
    state.access.authenticate(headers).ok_or_else(|| {
        tracing::debug!("Rejected request without a known bearer token");
        reply(StatusCode::UNAUTHORIZED, "Authentication required.")
    })
}

fn authorize_guild(grant: &AccessGrant, gid: &str) -> Result<(), ApiReply> {
    let Some(guild) = grant.guild(gid) else {
        return Err(reply(
            StatusCode::NOT_FOUND,
            "Guild doesn't exist in user's cache.",
        ));
    };

    if !can_edit(guild.permissions) {
        tracing::info!(gid = %gid, user = %grant.name, "Caller is not an editor of this guild");
        return Err(reply(
            StatusCode::FORBIDDEN,
            "You don't have permission to edit that guild's config.",
        ));
    }

    Ok(())
}

/// `application/json` or any `+json` media type, parameters ignored
fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Check the submitted text against the configured format
fn validate_config(text: &str, format: ConfigFormat) -> Result<(), String> {
    match format {
        ConfigFormat::Any => Ok(()),
        ConfigFormat::Json => serde_json::from_str::<serde_json::Value>(text)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str::<toml::Table>(text)
            .map(|_| ())
            .map_err(|e| e.to_string()),
    }
}

/// Update a guild's configuration
///
/// PUT|POST /api/{gid}/config
///
/// Body: `{"newConfig": "<text>"}`. Checks run in order: token (401),
/// content type (415), guild membership (404), permission (403),
/// body and format (400).
pub async fn update_config(
    State(state): State<AppState>,
    Path(gid): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiReply {
    let grant = match authenticate(&state, &headers) {
        Ok(grant) => grant,
        Err(e) => return e,
    };

    if !is_json(&headers) {
        return reply(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Content-Type must be application/json",
        );
    }

    if let Err(e) = authorize_guild(grant, &gid) {
        return e;
    }

    let update: ConfigUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(gid = %gid, "Failed to deserialize config update: {}", e);
            return reply(
                StatusCode::BAD_REQUEST,
                format!("Malformed configuration: {}", e),
            );
        }
    };

    if let Err(e) = validate_config(&update.new_config, state.settings.server.config_format) {
        tracing::info!(gid = %gid, user = %grant.name, "Rejected malformed config: {}", e);
        return reply(
            StatusCode::BAD_REQUEST,
            format!("Malformed configuration: {}", e),
        );
    }

    let stored = state.store.upsert(&gid, update.new_config).await;
    tracing::info!(
        gid = %gid,
        user = %grant.name,
        bytes = stored.config.len(),
        "Configuration updated"
    );

    reply(StatusCode::OK, "Configuration successfully updated.")
}

/// Read a guild's configuration
///
/// GET /api/{gid}/config
pub async fn get_config(
    State(state): State<AppState>,
    Path(gid): Path<String>,
    headers: HeaderMap,
) -> Result<Json<StoredConfig>, ApiReply> {
    let grant = authenticate(&state, &headers)?;
    authorize_guild(grant, &gid)?;

    let stored = state
        .store
        .get(&gid)
        .await
        .unwrap_or_else(|| StoredConfig::empty(&gid));
    Ok(Json(stored))
}

/// Ping endpoint for health checks
///
/// GET /ping
///
/// Returns server status and uptime information.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let response = PingResponse::new(uptime, version::get_version());

    tracing::debug!(
        "Ping response: uptime={}s, version={}",
        uptime,
        version::get_version()
    );
    Json(response)
}
