//! Database models - SQLx-compatible structs for PostgreSQL tables

mod appeal;
mod config;

pub use appeal::AppealModel;
pub use config::AppealConfigModel;
