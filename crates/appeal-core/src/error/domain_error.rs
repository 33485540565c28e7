//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Identity Provider Errors
    // =========================================================================
    #[error("Bearer token rejected by identity provider")]
    TokenRejected,

    #[error("Identity provider error: {0}")]
    ProviderError(String),

    #[error("OAuth code exchange failed: {0}")]
    CodeExchangeFailed(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Corrupt appeal record: {0}")]
    CorruptRecord(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("An appeal already exists for user {0}")]
    AppealAlreadyExists(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
