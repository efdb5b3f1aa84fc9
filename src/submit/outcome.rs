//! Submission outcomes
//!
//! Maps an HTTP status to the banner it ends in. Which failure codes get
//! a dedicated banner is controlled by [`RecognizedErrors`]; everything
//! else collapses into the generic error.

use std::collections::BTreeSet;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::status::Indicator;

/// A failure status with its own banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecognizedError {
    /// HTTP 400
    MalformedConfig,
    /// HTTP 403
    NotEditor,
}

impl RecognizedError {
    /// Status code this error is recognized by
    pub fn status(self) -> StatusCode {
        match self {
            RecognizedError::MalformedConfig => StatusCode::BAD_REQUEST,
            RecognizedError::NotEditor => StatusCode::FORBIDDEN,
        }
    }

    /// Banner shown for this error
    pub fn indicator(self) -> Indicator {
        match self {
            RecognizedError::MalformedConfig => Indicator::MalformedConfig,
            RecognizedError::NotEditor => Indicator::NotEditor,
        }
    }
}

/// The set of failure codes that get a dedicated banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedErrors {
    errors: BTreeSet<RecognizedError>,
}

impl RecognizedErrors {
    /// Recognize both 400 and 403
    pub fn full() -> Self {
        Self::from_iter([RecognizedError::MalformedConfig, RecognizedError::NotEditor])
    }

    /// Recognize nothing; every failure shows the generic banner
    pub fn generic_only() -> Self {
        Self {
            errors: BTreeSet::new(),
        }
    }

    /// Whether `error` is part of the set
    pub fn contains(&self, error: RecognizedError) -> bool {
        self.errors.contains(&error)
    }

    /// Recognized error for `status`, if any
    pub fn match_status(&self, status: StatusCode) -> Option<RecognizedError> {
        self.errors
            .iter()
            .copied()
            .find(|error| error.status() == status)
    }
}

impl Default for RecognizedErrors {
    fn default() -> Self {
        Self::full()
    }
}

impl FromIterator<RecognizedError> for RecognizedErrors {
    fn from_iter<I: IntoIterator<Item = RecognizedError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx response
    Success,
    /// Recognized 400
    MalformedConfig,
    /// Recognized 403
    NotEditor,
    /// Any other status, or no response at all
    Failed {
        /// Response status; `None` when the request never completed
        status: Option<u16>,
        /// Response body or transport error text
        detail: String,
    },
}

impl SubmitOutcome {
    /// Classify a completed response
    pub fn from_response(status: StatusCode, body: String, recognized: &RecognizedErrors) -> Self {
        if status.is_success() {
            return SubmitOutcome::Success;
        }

        match recognized.match_status(status) {
            Some(RecognizedError::MalformedConfig) => SubmitOutcome::MalformedConfig,
            Some(RecognizedError::NotEditor) => SubmitOutcome::NotEditor,
            None => SubmitOutcome::Failed {
                status: Some(status.as_u16()),
                detail: body,
            },
        }
    }

    /// A request that produced no response
    pub fn transport_failure(detail: impl Into<String>) -> Self {
        SubmitOutcome::Failed {
            status: None,
            detail: detail.into(),
        }
    }

    /// Banner to reveal
    pub fn indicator(&self) -> Indicator {
        match self {
            SubmitOutcome::Success => Indicator::Success,
            SubmitOutcome::MalformedConfig => Indicator::MalformedConfig,
            SubmitOutcome::NotEditor => Indicator::NotEditor,
            SubmitOutcome::Failed { .. } => Indicator::Error,
        }
    }

    /// Whether the update was accepted
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success)
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            SubmitOutcome::Success => 0,
            SubmitOutcome::Failed { .. } => 1,
            SubmitOutcome::MalformedConfig => 2,
            SubmitOutcome::NotEditor => 3,
        }
    }
}
