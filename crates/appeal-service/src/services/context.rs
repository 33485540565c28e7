//! Service context - dependency container for services
//!
//! Holds the repositories, the identity provider, and the OAuth client. Built
//! once at startup and shared by every request.

use std::sync::Arc;

use appeal_core::{
    AppealConfigRepository, AppealRepository, IdentityProvider, OAuthClient, Snowflake,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    appeal_repo: Arc<dyn AppealRepository>,
    config_repo: Arc<dyn AppealConfigRepository>,

    // Identity provider
    identity_provider: Arc<dyn IdentityProvider>,
    oauth_client: Arc<dyn OAuthClient>,

    /// Guild whose bans make a user eligible to appeal
    guild_id: Snowflake,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        appeal_repo: Arc<dyn AppealRepository>,
        config_repo: Arc<dyn AppealConfigRepository>,
        identity_provider: Arc<dyn IdentityProvider>,
        oauth_client: Arc<dyn OAuthClient>,
        guild_id: Snowflake,
    ) -> Self {
        Self {
            appeal_repo,
            config_repo,
            identity_provider,
            oauth_client,
            guild_id,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the appeal repository
    pub fn appeal_repo(&self) -> &dyn AppealRepository {
        self.appeal_repo.as_ref()
    }

    /// Get the questionnaire config repository
    pub fn config_repo(&self) -> &dyn AppealConfigRepository {
        self.config_repo.as_ref()
    }

    // === Identity provider ===

    /// Get the identity provider
    pub fn identity_provider(&self) -> &dyn IdentityProvider {
        self.identity_provider.as_ref()
    }

    /// Get the OAuth client
    pub fn oauth_client(&self) -> &dyn OAuthClient {
        self.oauth_client.as_ref()
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("identity_provider", &"...")
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    appeal_repo: Option<Arc<dyn AppealRepository>>,
    config_repo: Option<Arc<dyn AppealConfigRepository>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    oauth_client: Option<Arc<dyn OAuthClient>>,
    guild_id: Option<Snowflake>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appeal_repo(mut self, repo: Arc<dyn AppealRepository>) -> Self {
        self.appeal_repo = Some(repo);
        self
    }

    pub fn config_repo(mut self, repo: Arc<dyn AppealConfigRepository>) -> Self {
        self.config_repo = Some(repo);
        self
    }

    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn oauth_client(mut self, client: Arc<dyn OAuthClient>) -> Self {
        self.oauth_client = Some(client);
        self
    }

    pub fn guild_id(mut self, guild_id: Snowflake) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.appeal_repo
                .ok_or_else(|| ServiceError::validation("appeal_repo is required"))?,
            self.config_repo
                .ok_or_else(|| ServiceError::validation("config_repo is required"))?,
            self.identity_provider
                .ok_or_else(|| ServiceError::validation("identity_provider is required"))?,
            self.oauth_client
                .ok_or_else(|| ServiceError::validation("oauth_client is required"))?,
            self.guild_id
                .ok_or_else(|| ServiceError::validation("guild_id is required"))?,
        ))
    }
}
