//! Discord adapter errors

use appeal_core::DomainError;

/// Errors raised while talking to Discord
#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Discord rejected the credentials")]
    Unauthorized,

    #[error("Unexpected status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: &'static str },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<DiscordError> for DomainError {
    fn from(err: DiscordError) -> Self {
        match err {
            DiscordError::Unauthorized => DomainError::TokenRejected,
            other => DomainError::ProviderError(other.to_string()),
        }
    }
}
