//! Ports - traits implemented by the infrastructure crates

mod providers;
mod repositories;

pub use providers::{AccessGrant, IdentityProvider, OAuthClient};
pub use repositories::{AppealConfigRepository, AppealRepository, RepoResult};
