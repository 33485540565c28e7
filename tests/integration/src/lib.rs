//! Integration test utilities for the ban appeal server
//!
//! Runs the full router on an ephemeral port, backed by the in-memory
//! collaborators from `appeal-service`, and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
