//! Discord REST client for identity and ban lookups

use appeal_core::{BanRecord, DomainError, Identity, IdentityProvider, Snowflake};
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::error::{DiscordError, DiscordResult};
use crate::models::{BanPayload, UserPayload};

/// Discord REST client
///
/// User calls carry the caller's bearer token; guild calls carry the bot
/// token held here.
#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    api_base: String,
    bot_token: String,
}

impl DiscordClient {
    /// Create a client against `api_base` (e.g. `https://discord.com/api/v10`)
    pub fn new(http: Client, api_base: &str, bot_token: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Fetch the user owning `bearer_token`
    pub async fn get_current_user(&self, bearer_token: &str) -> DiscordResult<Identity> {
        let response = self
            .http
            .get(self.url("/users/@me"))
            .bearer_auth(bearer_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: UserPayload = response.json().await?;
                Ok(user.into())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DiscordError::Unauthorized),
            status => Err(DiscordError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: "current user",
            }),
        }
    }

    /// Fetch the ban of `user_id` in `guild_id`, `None` when not banned
    pub async fn get_guild_ban(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> DiscordResult<Option<BanRecord>> {
        let response = self
            .http
            .get(self.url(&format!("/guilds/{guild_id}/bans/{user_id}")))
            .header(AUTHORIZATION, format!("Bot {}", self.bot_token))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let ban: BanPayload = response.json().await?;
                Ok(Some(ban.into()))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(DiscordError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: "guild ban",
            }),
        }
    }
}

#[async_trait]
impl IdentityProvider for DiscordClient {
    #[instrument(skip_all)]
    async fn current_user(&self, bearer_token: &str) -> Result<Identity, DomainError> {
        let identity = self.get_current_user(bearer_token).await.map_err(|e| {
            debug!(error = %e, "Bearer token did not resolve");
            DomainError::from(e)
        })?;
        debug!(user_id = %identity.id, "Resolved current user");
        Ok(identity)
    }

    #[instrument(skip(self))]
    async fn guild_ban(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<Option<BanRecord>, DomainError> {
        self.get_guild_ban(guild_id, user_id).await.map_err(|e| {
            warn!(error = %e, "Guild ban lookup failed");
            DomainError::from(e)
        })
    }
}
