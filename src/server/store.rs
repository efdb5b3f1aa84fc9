//! In-memory guild configuration store

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::types::StoredConfig;

/// Latest configuration text per guild
#[derive(Debug, Default)]
pub struct ConfigStore {
    configs: RwLock<HashMap<String, StoredConfig>>,
}

impl ConfigStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored config of `gid`, if any
    pub async fn get(&self, gid: &str) -> Option<StoredConfig> {
        self.configs.read().await.get(gid).cloned()
    }

    /// Insert or replace the config of `gid`
    pub async fn upsert(&self, gid: &str, config: String) -> StoredConfig {
        let stored = StoredConfig {
            gid: gid.to_string(),
            config,
            updated_at: Some(Utc::now()),
        };
        self.configs
            .write()
            .await
            .insert(gid.to_string(), stored.clone());
        stored
    }

    /// Number of guilds with a stored config
    pub async fn len(&self) -> usize {
        self.configs.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.configs.read().await.is_empty()
    }
}
