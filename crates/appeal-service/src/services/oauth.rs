//! OAuth service
//!
//! Backs `/login` and the `/discord` redirect.

use appeal_core::AccessGrant;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::LoginError;

/// OAuth service
pub struct OAuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OAuthService<'a> {
    /// Create a new OAuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Where to send the browser to log in
    pub fn login_url(&self) -> String {
        self.ctx.oauth_client().authorize_url()
    }

    /// Exchange the `code` Discord redirected back with
    #[instrument(skip_all)]
    pub async fn complete_login(&self, code: Option<&str>) -> Result<AccessGrant, LoginError> {
        let code = code.filter(|c| !c.is_empty()).ok_or(LoginError::MissingCode)?;

        let grant = self
            .ctx
            .oauth_client()
            .exchange_code(code)
            .await
            .map_err(|e| {
                warn!(error = %e, "Code exchange failed");
                LoginError::ExchangeFailed(e)
            })?;

        info!(expires_in = grant.expires_in, "Login completed");
        Ok(grant)
    }
}
