//! Response types and error handling for API endpoints
//!
//! Every refusal becomes `{ "error": {title, description}, "user"? }` with the
//! status the service layer chose. Login failures are plain text, since
//! the browser lands on them directly.

use appeal_core::{AccessGrant, Identity, Notice};
use appeal_service::{LoginError, Refusal, ServiceError};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Name of the cookie holding the Discord bearer token
pub const SESSION_COOKIE: &str = "token";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(#[from] Refusal),

    #[error("{0}")]
    Login(#[from] LoginError),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Rejected(Refusal::from(err))
    }
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::Rejected(refusal) => refusal.error.status_code(),
            Self::Login(err) => err.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(refusal) => refusal.error.error_code(),
            Self::Login(LoginError::MissingCode) => "MISSING_CODE",
            Self::Login(LoginError::ExchangeFailed(_)) => "CODE_EXCHANGE_FAILED",
        }
    }
}

/// Failure body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: Notice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        match self {
            Self::Rejected(Refusal { error: err, user }) => {
                // Upstream detail goes to the log, never to the client
                if status.is_server_error() {
                    error!(error = %err, code, "Server error occurred");
                }

                let clears_token = err.clears_token();
                let body = ErrorBody {
                    error: err.notice(),
                    user,
                };
                let mut response = (status, Json(body)).into_response();
                if clears_token {
                    append_cookie(&mut response, &removal_cookie());
                }
                response
            }
            Self::Login(err) => {
                warn!(error = ?err, code, "Login failed");
                (status, err.to_string()).into_response()
            }
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// `302 Found` redirect
///
/// `axum::response::Redirect` only offers 303, 307 and 308.
#[derive(Debug, Clone)]
pub struct Found(pub String);

impl Found {
    pub fn to(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, self.0)]).into_response()
    }
}

/// Cookie carrying a freshly granted token, expiring with the token
///
/// Returns `None` if the token can't be carried in a cookie value.
pub fn session_cookie(grant: &AccessGrant) -> Option<Cookie<'static>> {
    let raw = format!(
        "{SESSION_COOKIE}={}; Path=/; Max-Age={}",
        grant.access_token, grant.expires_in
    );
    let mut cookie = Cookie::parse(raw).ok()?.into_owned();
    if cookie.value() != grant.access_token {
        return None;
    }
    cookie.set_same_site(SameSite::Lax);
    Some(cookie)
}

/// Cookie that deletes the session cookie
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}

fn append_cookie(response: &mut Response, cookie: &Cookie<'_>) {
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => warn!(error = %e, "Dropping unencodable cookie"),
    }
}
