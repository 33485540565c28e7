//! Route definitions
//!
//! The JSON API under `/api`, the login redirects at the root, and health
//! probes kept apart so they skip rate limiting.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{appeal, auth, health, status};
use crate::state::AppState;

/// Create the main router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(auth_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Questionnaire API
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status::get_status))
        .route("/appeal", post(appeal::submit_appeal))
}

/// Discord login routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login))
        .route("/discord", get(auth::oauth_callback))
        .route("/logout", get(auth::logout))
}
