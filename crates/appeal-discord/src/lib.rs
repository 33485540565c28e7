//! # appeal-discord
//!
//! Discord REST adapter implementing the identity provider and OAuth ports
//! from `appeal-core`.
//!
//! - [`DiscordClient`]: `GET /users/@me` with the user's bearer token and
//!   `GET /guilds/{guild}/bans/{user}` with the bot token
//! - [`DiscordOAuth`]: authorize URL and `POST /oauth2/token`
//!
//! Both hold a single `reqwest::Client`, built once at startup.

mod client;
mod error;
mod models;
mod oauth;

pub use client::DiscordClient;
pub use error::{DiscordError, DiscordResult};
pub use oauth::{DiscordOAuth, OAuthSettings};

use std::time::Duration;

/// Per-request timeout for Discord calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared HTTP client
pub fn http_client() -> DiscordResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("ban-appeal/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
