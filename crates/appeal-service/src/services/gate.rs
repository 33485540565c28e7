//! Eligibility gate
//!
//! Decides whether the caller may see or submit the questionnaire. Checks
//! run in order and the first failing one ends the request:
//!
//! 1. a token is present
//! 2. the token resolves to an identity
//! 3. the identity is banned from the guild
//! 4. no appeal is on file for the identity
//!
//! The gate only reads.

use appeal_core::{AppealStatus, Identity};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::{AuthFailure, Refusal, ServiceError};

/// Eligibility gate
pub struct EligibilityGate<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EligibilityGate<'a> {
    /// Create a new EligibilityGate
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run every check for the caller's bearer token
    ///
    /// Returns the identity when the caller may appeal.
    #[instrument(skip_all)]
    pub async fn check(&self, token: Option<&str>) -> Result<Identity, Refusal> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            info!("No token presented");
            return Err(Refusal::anonymous(ServiceError::Unauthenticated(
                AuthFailure::MissingToken,
            )));
        };

        // Any provider failure here means "not logged in"
        let user = match self.ctx.identity_provider().current_user(token).await {
            Ok(user) => user,
            Err(e) => {
                info!(error = %e, "Token did not resolve");
                return Err(Refusal::anonymous(ServiceError::Unauthenticated(
                    AuthFailure::InvalidToken,
                )));
            }
        };

        // A failed ban lookup reads as "not banned"
        let ban = match self
            .ctx
            .identity_provider()
            .guild_ban(self.ctx.guild_id(), user.id)
            .await
        {
            Ok(ban) => ban,
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Ban lookup failed");
                None
            }
        };
        if ban.is_none() {
            info!(user_id = %user.id, "User is not banned");
            return Err(Refusal::for_user(ServiceError::NotBanned, user));
        }

        let appeal = match self.ctx.appeal_repo().find_by_user(user.id).await {
            Ok(appeal) => appeal,
            Err(e) => {
                return Err(Refusal::for_user(ServiceError::upstream(e), user));
            }
        };

        match appeal.map(|a| a.status) {
            None => {
                info!(user_id = %user.id, "User may appeal");
                Ok(user)
            }
            Some(status @ (AppealStatus::Accepted | AppealStatus::Rejected)) => {
                info!(user_id = %user.id, %status, "Appeal already decided");
                Err(Refusal::for_user(ServiceError::AlreadyDecided(status), user))
            }
            Some(status @ (AppealStatus::Polling | AppealStatus::Pending)) => {
                info!(user_id = %user.id, %status, "Appeal awaiting review");
                Err(Refusal::for_user(ServiceError::InProgress, user))
            }
        }
    }
}
