//! Common test utilities and helpers
//!
//! Shared settings factories, mock endpoints and a log capture writer.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cweb_config::{
    Indicator, StatusDisplay,
    config::{AccessGrant, ClientSettings, GuildGrant, Settings},
    types::ApiMessage,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Guild the test token can edit
pub const EDITABLE_GUILD: &str = "1001";
/// Guild the test token is a plain member of
pub const READ_ONLY_GUILD: &str = "1002";
/// Token of the test editor
pub const EDITOR_TOKEN: &str = "editor-token";

/// Test configuration factory
pub struct TestConfig;

impl TestConfig {
    /// Client settings pointed at `base_url`
    pub fn client(base_url: &str) -> ClientSettings {
        ClientSettings {
            base_url: base_url.to_string(),
            request_timeout: Some(5),
            ..ClientSettings::default()
        }
    }

    /// Server settings with one token: admin of one guild, member of another
    pub fn server() -> Settings {
        let mut settings = Settings::default();
        settings.server.port = 0;
        settings.logging.level = Some("debug".to_string());
        settings.access.push(AccessGrant {
            name: "editor".to_string(),
            token: EDITOR_TOKEN.to_string(),
            guilds: vec![
                GuildGrant {
                    id: EDITABLE_GUILD.to_string(),
                    permissions: 0x20,
                },
                GuildGrant {
                    id: READ_ONLY_GUILD.to_string(),
                    permissions: 0x400,
                },
            ],
        });
        settings
    }
}

/// Mock endpoint factory
pub struct MockServerFactory;

impl MockServerFactory {
    /// Endpoint answering every update for `gid` with `status`
    pub async fn responding(gid: &str, status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/api/{gid}/config")))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(ApiMessage::new(status, format!("status {status}"))),
            )
            .mount(&server)
            .await;
        server
    }

    /// Endpoint that holds each response for `delay` before answering 200
    pub async fn delayed(gid: &str, delay: Duration) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/api/{gid}/config")))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&server)
            .await;
        server
    }
}

/// Display that records every visibility change, in order
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    calls: Arc<Mutex<Vec<(Indicator, bool)>>>,
}

impl RecordingDisplay {
    /// Every `set_visible` call so far
    pub fn calls(&self) -> Vec<(Indicator, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn set_visible(&self, indicator: Indicator, visible: bool) {
        self.calls.lock().unwrap().push((indicator, visible));
    }
}

/// `MakeWriter` that keeps everything written to it
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Captured output so far
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Subscriber writing uncolored logs into `logs`
pub fn capturing_subscriber(
    logs: &CapturedLogs,
) -> impl tracing::Subscriber + Send + Sync + use<> {
    tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish()
}
