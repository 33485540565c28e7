//! Discord wire payloads

use appeal_core::{AccessGrant, BanRecord, Identity, Snowflake};
use serde::Deserialize;

/// Default token lifetime when Discord omits `expires_in` (7 days)
const DEFAULT_EXPIRES_IN: i64 = 604_800;

/// `GET /users/@me`
#[derive(Debug, Deserialize)]
pub(crate) struct UserPayload {
    pub id: Snowflake,
    pub username: String,
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

fn default_discriminator() -> String {
    "0".to_string()
}

impl From<UserPayload> for Identity {
    fn from(payload: UserPayload) -> Self {
        Identity {
            id: payload.id,
            username: payload.username,
            discriminator: payload.discriminator,
            avatar: payload.avatar,
        }
    }
}

/// `GET /guilds/{guild}/bans/{user}`
#[derive(Debug, Deserialize)]
pub(crate) struct BanPayload {
    #[serde(default)]
    pub reason: Option<String>,
    pub user: BanUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BanUser {
    pub id: Snowflake,
}

impl From<BanPayload> for BanRecord {
    fn from(payload: BanPayload) -> Self {
        BanRecord {
            user_id: payload.user.id,
            reason: payload.reason,
        }
    }
}

/// `POST /oauth2/token`; fields are optional because error bodies share the
/// endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct TokenPayload {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenPayload {
    pub fn into_grant(self) -> Option<AccessGrant> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        Some(AccessGrant {
            access_token,
            expires_in: self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
        })
    }
}
