//! # appeal-service
//!
//! Application layer: the eligibility gate, the submission pipeline, the
//! status and login use cases, and their DTOs.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use services::{
    AppealService, AuthFailure, EligibilityGate, HealthService, LoginError, OAuthService,
    Refusal, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, StatusService,
};
