//! Login handlers
//!
//! Discord OAuth: send the browser to Discord, take the code it comes back
//! with, and keep the resulting token in a cookie.

use appeal_core::DomainError;
use appeal_service::{dto::OAuthCallbackQuery, LoginError, OAuthService};
use axum::extract::{Query, State};
use axum_extra::extract::CookieJar;

use crate::response::{removal_cookie, session_cookie, ApiResult, Found};
use crate::state::AppState;

/// Redirect to the Discord authorize page
///
/// GET /login
pub async fn login(State(state): State<AppState>) -> Found {
    Found(OAuthService::new(state.service_context()).login_url())
}

/// OAuth redirect target
///
/// GET /discord?code=...
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Found)> {
    let service = OAuthService::new(state.service_context());
    let grant = service.complete_login(query.code.as_deref()).await?;

    let cookie = session_cookie(&grant).ok_or_else(|| {
        LoginError::ExchangeFailed(DomainError::CodeExchangeFailed(
            "access token is not cookie-safe".to_string(),
        ))
    })?;

    Ok((jar.add(cookie), Found::to("/")))
}

/// Forget the session
///
/// GET /logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Found) {
    (jar.add(removal_cookie()), Found::to("/"))
}
