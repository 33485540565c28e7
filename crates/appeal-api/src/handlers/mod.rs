//! HTTP handlers
//!
//! Thin adapters from requests to service calls.

pub mod appeal;
pub mod auth;
pub mod health;
pub mod status;
