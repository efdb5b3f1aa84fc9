//! Access control for the config endpoint
//!
//! Callers authenticate with a bearer token from the `[[access]]` table.
//! A token may edit a guild's config when its permission bits for that
//! guild include ADMINISTRATOR or MANAGE_GUILD.

use std::collections::HashMap;

use axum::http::{HeaderMap, header};

use crate::config::{AccessGrant, GuildGrant};

/// Discord ADMINISTRATOR permission bit
pub const ADMINISTRATOR: u64 = 0x8;
/// Discord MANAGE_GUILD permission bit
pub const MANAGE_GUILD: u64 = 0x20;

/// Whether `permissions` allow editing a guild's configuration
pub fn can_edit(permissions: u64) -> bool {
    permissions & (ADMINISTRATOR | MANAGE_GUILD) != 0
}

impl AccessGrant {
    /// Membership entry for `gid`
    pub fn guild(&self, gid: &str) -> Option<&GuildGrant> {
        self.guilds.iter().find(|guild| guild.id == gid)
    }
}

/// Token lookup table
#[derive(Debug, Clone, Default)]
pub struct AccessTable {
    grants: HashMap<String, AccessGrant>,
}

impl AccessTable {
    /// Build from settings. A repeated token keeps its last entry.
    pub fn from_grants(grants: &[AccessGrant]) -> Self {
        let grants = grants
            .iter()
            .map(|grant| (grant.token.clone(), grant.clone()))
            .collect();
        Self { grants }
    }

    /// Grant for the bearer token in `headers`
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<&AccessGrant> {
        bearer_token(headers).and_then(|token| self.grants.get(token))
    }

    /// Number of known tokens
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Whether no tokens are configured
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
