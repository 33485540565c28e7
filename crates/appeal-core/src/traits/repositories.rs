//! Repository traits (ports) - define the interface for appeal storage
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Appeal, AppealConfig};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Appeal Repository
// ============================================================================

#[async_trait]
pub trait AppealRepository: Send + Sync {
    /// Find the appeal submitted by a user, if any
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Appeal>>;

    /// Store a new appeal
    ///
    /// The write is conditional: when an appeal already exists for the user
    /// nothing is written and `DomainError::AppealAlreadyExists` is returned.
    async fn create(&self, appeal: &Appeal) -> RepoResult<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Appeal Config Repository
// ============================================================================

#[async_trait]
pub trait AppealConfigRepository: Send + Sync {
    /// Load the singleton questionnaire configuration
    async fn get(&self) -> RepoResult<Option<AppealConfig>>;
}
