//! Config submitter
//!
//! Reads the editor, PUTs the text to `/api/{gid}/config` and reveals the
//! banner matching the response. All HTTP outcomes end here: they become a
//! banner (plus a diagnostic log entry for generic failures) and are
//! returned for inspection, never retried.

use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use url::Url;

use super::editor::EditorSource;
use super::network::{build_client, config_endpoint};
use super::outcome::{RecognizedErrors, SubmitOutcome};
use super::status::{Indicator, StatusDisplay};
use crate::{Error, Result, config::ClientSettings, types::ConfigUpdate};

/// Submits editor contents as a guild configuration update
pub struct ConfigSubmitter {
    client: Client,
    base_url: Url,
    token: Option<String>,
    recognized: RecognizedErrors,
    editor: Box<dyn EditorSource>,
    display: Box<dyn StatusDisplay>,
    /// Held for the whole lifetime of one submission
    in_flight: Mutex<()>,
}

impl ConfigSubmitter {
    /// Create a submitter from client settings
    pub fn new(
        settings: &ClientSettings,
        editor: impl EditorSource + 'static,
        display: impl StatusDisplay + 'static,
    ) -> Result<Self> {
        Self::from_boxed(settings, Box::new(editor), Box::new(display))
    }

    /// Same as [`ConfigSubmitter::new`] for already boxed collaborators
    pub fn from_boxed(
        settings: &ClientSettings,
        editor: Box<dyn EditorSource>,
        display: Box<dyn StatusDisplay>,
    ) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)?;
        let client = build_client(settings)?;

        Ok(Self {
            client,
            base_url,
            token: settings.token.clone(),
            recognized: settings.recognized_errors.iter().copied().collect(),
            editor,
            display,
            in_flight: Mutex::new(()),
        })
    }

    /// Replace the set of failure codes with a dedicated banner
    pub fn with_recognized_errors(mut self, recognized: RecognizedErrors) -> Self {
        self.recognized = recognized;
        self
    }

    /// Failure codes with a dedicated banner
    pub fn recognized_errors(&self) -> &RecognizedErrors {
        &self.recognized
    }

    /// Submit the editor's current text as the configuration of `gid`
    ///
    /// Returns `Err` only when the submission could not start: another one
    /// is in flight (indicators untouched), or the editor or endpoint URL
    /// failed (generic banner shown). Every HTTP outcome is `Ok`.
    pub async fn submit(&self, gid: &str) -> Result<SubmitOutcome> {
        let _guard = self.in_flight.try_lock().map_err(|_| {
            warn!(gid, "Rejecting config update: previous update still in flight");
            Error::in_flight(gid)
        })?;

        self.display.hide_all();

        let (url, update) = match self.prepare(gid).await {
            Ok(prepared) => prepared,
            Err(e) => {
                error!(gid, "Failed to prepare config update: {}", e);
                self.display.show(Indicator::Error);
                return Err(e);
            }
        };

        debug!(
            gid,
            %url,
            bytes = update.new_config.len(),
            "Submitting config update"
        );

        let outcome = self.dispatch(url, &update).await;
        match &outcome {
            SubmitOutcome::Failed { status, detail } => {
                error!(gid, status = ?status, response = %detail, "Failed to update config");
            }
            other => {
                info!(gid, indicator = %other.indicator(), "Config update resolved");
            }
        }

        self.display.show(outcome.indicator());
        Ok(outcome)
    }

    async fn prepare(&self, gid: &str) -> Result<(Url, ConfigUpdate)> {
        let text = self.editor.current_text().await?;
        let url = config_endpoint(&self.base_url, gid)?;
        Ok((url, ConfigUpdate::new(text)))
    }

    async fn dispatch(&self, url: Url, update: &ConfigUpdate) -> SubmitOutcome {
        let mut request = self.client.put(url).json(update);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
                SubmitOutcome::from_response(status, body, &self.recognized)
            }
            Err(e) => SubmitOutcome::transport_failure(e.to_string()),
        }
    }
}

impl std::fmt::Debug for ConfigSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSubmitter")
            .field("base_url", &self.base_url.as_str())
            .field("editor", &self.editor.describe())
            .field("recognized", &self.recognized)
            .finish_non_exhaustive()
    }
}
