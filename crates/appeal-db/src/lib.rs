//! # appeal-db
//!
//! Database layer implementing the appeal repository traits with PostgreSQL
//! via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and idempotent schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use appeal_db::{apply_schema, create_pool, DatabaseConfig, PgAppealRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     apply_schema(&pool).await?;
//!     let appeals = PgAppealRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{apply_schema, create_pool, DatabaseConfig, PgPool};
pub use repositories::{PgAppealConfigRepository, PgAppealRepository};
