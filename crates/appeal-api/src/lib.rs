//! # appeal-api
//!
//! HTTP server for the ban appeal site, built with Axum.
//!
//! Serves the JSON API the questionnaire client talks to, the Discord login
//! redirects, health probes, and optionally the client's static files.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
