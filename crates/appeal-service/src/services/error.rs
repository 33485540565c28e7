//! Service layer error types
//!
//! Every way a request can end short of success. Each variant knows the
//! HTTP status and the `{title, description}` shown to the user.

use appeal_core::{AppealStatus, DomainError, Identity, Notice};
use std::fmt;

/// Why a request is not authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `token` cookie at all
    MissingToken,
    /// The provider did not resolve the token
    InvalidToken,
}

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Not logged in, or the login no longer works
    Unauthenticated(AuthFailure),

    /// Logged in but not banned from the guild
    NotBanned,

    /// The previous appeal was accepted or rejected
    AlreadyDecided(AppealStatus),

    /// An appeal is waiting for review
    InProgress,

    /// Malformed or out-of-bounds submission
    Validation(String),

    /// Repository or provider failure; the detail is for logs only
    Upstream(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated(AuthFailure::MissingToken) => write!(f, "Missing token"),
            Self::Unauthenticated(AuthFailure::InvalidToken) => write!(f, "Invalid token"),
            Self::NotBanned => write!(f, "User is not banned"),
            Self::AlreadyDecided(status) => write!(f, "Appeal already {status}"),
            Self::InProgress => write!(f, "Appeal in progress"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Upstream(msg) => write!(f, "Upstream failure: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl fmt::Display) -> Self {
        Self::Upstream(msg.to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated(_) => 401,
            Self::Validation(_) => 400,
            Self::NotBanned | Self::AlreadyDecided(_) | Self::InProgress => 200,
            Self::Upstream(_) => 500,
        }
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(AuthFailure::MissingToken) => "MISSING_TOKEN",
            Self::Unauthenticated(AuthFailure::InvalidToken) => "INVALID_TOKEN",
            Self::NotBanned => "NOT_BANNED",
            Self::AlreadyDecided(_) => "ALREADY_DECIDED",
            Self::InProgress => "IN_PROGRESS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Upstream(_) => "UPSTREAM_FAILURE",
        }
    }

    /// Title shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            Self::Unauthenticated(AuthFailure::MissingToken) => "Huh",
            Self::Unauthenticated(AuthFailure::InvalidToken) => "Error",
            Self::NotBanned => "Nope.",
            Self::AlreadyDecided(_) => "Cannot re-appeal.",
            Self::InProgress => "Wait.",
            Self::Validation(_) | Self::Upstream(_) => "Error",
        }
    }

    /// Description shown to the user
    pub fn description(&self) -> String {
        match self {
            Self::Unauthenticated(AuthFailure::MissingToken) => {
                "You're not supposed to be here.".to_string()
            }
            Self::Unauthenticated(AuthFailure::InvalidToken) => "Not authorized".to_string(),
            Self::NotBanned => "You're not banned.".to_string(),
            Self::AlreadyDecided(AppealStatus::Accepted) => "Your last appeal was accepted.\n\
                 You have since been banned again, and are ineligible to re-appeal."
                .to_string(),
            Self::AlreadyDecided(status) => format!("Your last appeal was {status}."),
            Self::InProgress => "Your appeal is currently being processed.".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::Upstream(_) => "Something went wrong. Please try again later.".to_string(),
        }
    }

    /// Whether the response must clear the `token` cookie
    pub fn clears_token(&self) -> bool {
        matches!(self, Self::Unauthenticated(AuthFailure::InvalidToken))
    }

    /// The user-facing `{title, description}`
    pub fn notice(&self) -> Notice {
        Notice::new(self.title(), self.description())
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::TokenRejected => Self::Unauthenticated(AuthFailure::InvalidToken),
            DomainError::AppealAlreadyExists(_) => Self::InProgress,
            DomainError::ValidationError(msg) => Self::Validation(msg),
            other => Self::Upstream(other.to_string()),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A terminal gate outcome, with the identity when one was resolved
#[derive(Debug)]
pub struct Refusal {
    pub error: ServiceError,
    pub user: Option<Identity>,
}

impl Refusal {
    /// Refusal before any identity is known
    pub fn anonymous(error: ServiceError) -> Self {
        Self { error, user: None }
    }

    /// Refusal for a resolved user
    pub fn for_user(error: ServiceError, user: Identity) -> Self {
        Self {
            error,
            user: Some(user),
        }
    }
}

impl From<ServiceError> for Refusal {
    fn from(error: ServiceError) -> Self {
        Self::anonymous(error)
    }
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for Refusal {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Failures of the OAuth callback
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("No code provided")]
    MissingCode,

    #[error("Authorization failed")]
    ExchangeFailed(#[source] DomainError),
}

impl LoginError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        400
    }
}
