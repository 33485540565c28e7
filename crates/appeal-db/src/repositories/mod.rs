//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in appeal-core.

mod appeal;
mod config;
mod error;

pub use appeal::PgAppealRepository;
pub use config::PgAppealConfigRepository;
