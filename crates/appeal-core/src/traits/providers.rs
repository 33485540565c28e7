//! Identity provider ports
//!
//! The eligibility gate only needs two lookups from the provider; the login
//! flow needs the OAuth code exchange. Both are injected as trait objects so
//! the gate never depends on a concrete HTTP client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::entities::{BanRecord, Identity};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a user's bearer token to their identity
    async fn current_user(&self, bearer_token: &str) -> Result<Identity, DomainError>;

    /// Look up a ban of `user_id` in `guild_id`; `None` means not banned
    async fn guild_ban(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<Option<BanRecord>, DomainError>;
}

/// Access token granted by a successful code exchange
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessGrant {
    pub access_token: String,
    /// Lifetime of the token in seconds
    pub expires_in: i64,
}

#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// URL the browser is sent to in order to start the login
    fn authorize_url(&self) -> String;

    /// Exchange an authorization code for an access token
    async fn exchange_code(&self, code: &str) -> Result<AccessGrant, DomainError>;
}
