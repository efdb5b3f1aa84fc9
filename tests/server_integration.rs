//! HTTP server integration tests
//!
//! Exercises the config endpoint through the full router, including the
//! order in which its checks reject a request.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{EDITABLE_GUILD, EDITOR_TOKEN, READ_ONLY_GUILD, TestConfig};
use cweb_config::{
    config::ConfigFormat,
    server::{AppState, ConfigStore, create_app, create_app_with_state},
    types::{ApiMessage, PingResponse, StoredConfig},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tower::ServiceExt;

fn update_request(
    gid: &str,
    token: Option<&str>,
    content_type: &str,
    body: &str,
) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(format!("/api/{gid}/config"))
        .method("PUT")
        .header(header::CONTENT_TYPE, content_type);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_server_ping_endpoint() {
    let app = create_app(TestConfig::server());

    let request = Request::builder()
        .uri("/ping")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ping: PingResponse = read_json(response).await;
    assert_eq!(ping.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_update_then_read_back() {
    let store = Arc::new(ConfigStore::new());
    let state = AppState::with_store(TestConfig::server(), store.clone());
    let app = create_app_with_state(state);

    let response = app
        .clone()
        .oneshot(update_request(
            EDITABLE_GUILD,
            Some(EDITOR_TOKEN),
            "application/json",
            r#"{"newConfig":"prefix = \"?\""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let message: ApiMessage = read_json(response).await;
    assert_eq!(
        message,
        ApiMessage::new(200, "Configuration successfully updated.")
    );

    let request = Request::builder()
        .uri(format!("/api/{EDITABLE_GUILD}/config"))
        .header(header::AUTHORIZATION, format!("Bearer {EDITOR_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored: StoredConfig = read_json(response).await;
    assert_eq!(stored.gid, EDITABLE_GUILD);
    assert_eq!(stored.config, "prefix = \"?\"");
    assert!(stored.updated_at.is_some());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_post_is_accepted_like_put() {
    let app = create_app(TestConfig::server());
    let request = Request::builder()
        .uri(format!("/api/{EDITABLE_GUILD}/config"))
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {EDITOR_TOKEN}"))
        .body(Body::from(r#"{"newConfig":""}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// Each case fails exactly one check; earlier checks win.
#[rstest]
#[case::no_token(EDITABLE_GUILD, None, "text/plain", "junk", StatusCode::UNAUTHORIZED)]
#[case::bad_content_type(
    "9999",
    Some(EDITOR_TOKEN),
    "text/plain",
    "junk",
    StatusCode::UNSUPPORTED_MEDIA_TYPE
)]
#[case::unknown_guild(
    "9999",
    Some(EDITOR_TOKEN),
    "application/json",
    "junk",
    StatusCode::NOT_FOUND
)]
#[case::not_editor(
    READ_ONLY_GUILD,
    Some(EDITOR_TOKEN),
    "application/json",
    "junk",
    StatusCode::FORBIDDEN
)]
#[case::malformed_body(
    EDITABLE_GUILD,
    Some(EDITOR_TOKEN),
    "application/json",
    "junk",
    StatusCode::BAD_REQUEST
)]
#[case::missing_field(
    EDITABLE_GUILD,
    Some(EDITOR_TOKEN),
    "application/json",
    r#"{"config":"x"}"#,
    StatusCode::BAD_REQUEST
)]
#[tokio::test]
async fn test_update_check_order(
    #[case] gid: &str,
    #[case] token: Option<&str>,
    #[case] content_type: &str,
    #[case] body: &str,
    #[case] expected: StatusCode,
) {
    let app = create_app(TestConfig::server());

    let response = app
        .oneshot(update_request(gid, token, content_type, body))
        .await
        .unwrap();

    assert_eq!(response.status(), expected);
    let message: ApiMessage = read_json(response).await;
    assert_eq!(message.code, expected.as_u16());
}

#[tokio::test]
async fn test_json_format_rejects_toml_text() {
    let mut settings = TestConfig::server();
    settings.server.config_format = ConfigFormat::Json;
    let app = create_app(settings);

    let response = app
        .clone()
        .oneshot(update_request(
            EDITABLE_GUILD,
            Some(EDITOR_TOKEN),
            "application/json",
            r#"{"newConfig":"prefix = 1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message: ApiMessage = read_json(response).await;
    assert!(message.message.starts_with("Malformed configuration"));

    let response = app
        .oneshot(update_request(
            EDITABLE_GUILD,
            Some(EDITOR_TOKEN),
            "application/json",
            r#"{"newConfig":"{\"prefix\": 1}"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_requires_membership() {
    let app = create_app(TestConfig::server());
    let request = Request::builder()
        .uri("/api/9999/config")
        .header(header::AUTHORIZATION, format!("Bearer {EDITOR_TOKEN}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut settings = TestConfig::server();
    settings.server.max_body_size = 64;
    let app = create_app(settings);

    let body = serde_json::json!({ "newConfig": "x".repeat(256) }).to_string();
    let response = app
        .oneshot(update_request(
            EDITABLE_GUILD,
            Some(EDITOR_TOKEN),
            "application/json",
            &body,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_app(TestConfig::server());
    let request = Request::builder()
        .uri(format!("/api/{EDITABLE_GUILD}/config"))
        .method("OPTIONS")
        .header(header::ORIGIN, "http://dashboard.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}
