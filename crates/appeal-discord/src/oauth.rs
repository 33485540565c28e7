//! Discord OAuth2 authorization-code flow

use appeal_core::{AccessGrant, DomainError, OAuthClient};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{instrument, warn};

use crate::error::{DiscordError, DiscordResult};
use crate::models::TokenPayload;

/// OAuth application settings
#[derive(Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Browser-facing authorize endpoint
    pub authorize_url: String,
    /// REST base used for the token endpoint
    pub api_base: String,
}

/// Discord OAuth2 client
#[derive(Clone)]
pub struct DiscordOAuth {
    http: Client,
    settings: OAuthSettings,
    authorize: Url,
}

impl DiscordOAuth {
    /// Create the client; the authorize URL is built once here
    pub fn new(http: Client, settings: OAuthSettings) -> DiscordResult<Self> {
        let authorize = Url::parse_with_params(
            &settings.authorize_url,
            &[
                ("client_id", settings.client_id.as_str()),
                ("response_type", "code"),
                ("scope", "identify"),
                ("redirect_uri", settings.redirect_uri.as_str()),
            ],
        )
        .map_err(|e| DiscordError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            http,
            settings,
            authorize,
        })
    }

    fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.settings.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl OAuthClient for DiscordOAuth {
    fn authorize_url(&self) -> String {
        self.authorize.to_string()
    }

    #[instrument(skip_all)]
    async fn exchange_code(&self, code: &str) -> Result<AccessGrant, DomainError> {
        let response = self
            .http
            .post(self.token_url())
            .form(&[
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::CodeExchangeFailed(e.to_string()))?;

        let status = response.status();
        let payload: TokenPayload = response
            .json()
            .await
            .map_err(|e| DomainError::CodeExchangeFailed(e.to_string()))?;

        payload.into_grant().ok_or_else(|| {
            warn!(status = status.as_u16(), "Token endpoint returned no access token");
            DomainError::CodeExchangeFailed(format!("no access token (status {status})"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> OAuthSettings {
        OAuthSettings {
            client_id: "123456".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8080/discord".to_string(),
            authorize_url: "https://discord.com/oauth2/authorize".to_string(),
            api_base: "https://discord.com/api/v10".to_string(),
        }
    }

    #[test]
    fn test_authorize_url() {
        let oauth = DiscordOAuth::new(Client::new(), settings()).unwrap();
        assert_eq!(
            oauth.authorize_url(),
            "https://discord.com/oauth2/authorize?client_id=123456&response_type=code\
             &scope=identify&redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fdiscord"
        );
    }

    #[test]
    fn test_invalid_authorize_url() {
        let mut settings = settings();
        settings.authorize_url = "not a url".to_string();
        assert!(matches!(
            DiscordOAuth::new(Client::new(), settings),
            Err(DiscordError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_token_url() {
        let oauth = DiscordOAuth::new(Client::new(), settings()).unwrap();
        assert_eq!(oauth.token_url(), "https://discord.com/api/v10/oauth2/token");
    }
}
