//! Identity as reported by the identity provider

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Base URL of the Discord CDN
const CDN_BASE: &str = "https://cdn.discordapp.com";

/// The logged-in user, resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Identity {
    pub fn new(id: Snowflake, username: impl Into<String>, discriminator: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            discriminator: discriminator.into(),
            avatar: None,
        }
    }

    /// Full tag for the page header: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Header avatar URL, or the default embed avatar when no hash is set
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!("{CDN_BASE}/avatars/{}/{hash}.png?size=256", self.id),
            None => format!("{CDN_BASE}/embed/avatars/{}.png", self.default_avatar_index()),
        }
    }

    fn default_avatar_index(&self) -> u8 {
        (self.discriminator.parse::<u16>().unwrap_or(0) % 5) as u8
    }
}

/// Evidence that a user is banned from the guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRecord {
    pub user_id: Snowflake,
    pub reason: Option<String>,
}
