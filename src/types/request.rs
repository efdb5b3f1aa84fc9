//! Request type definitions

use serde::{Deserialize, Serialize};

/// Body of `PUT /api/{gid}/config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// Full configuration text, exactly as it was in the editor
    #[serde(rename = "newConfig")]
    pub new_config: String,
}

impl ConfigUpdate {
    /// Create a new update carrying `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            new_config: text.into(),
        }
    }
}
