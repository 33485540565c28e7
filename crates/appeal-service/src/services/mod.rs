//! Business logic services
//!
//! Every request-facing use case runs the eligibility gate first; services
//! borrow the shared [`ServiceContext`] for the duration of one request.

pub mod appeal;
pub mod context;
pub mod error;
pub mod gate;
pub mod health;
pub mod oauth;
pub mod status;

// Re-export all services for convenience
pub use appeal::AppealService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{AuthFailure, LoginError, Refusal, ServiceError, ServiceResult};
pub use gate::EligibilityGate;
pub use health::HealthService;
pub use oauth::OAuthService;
pub use status::StatusService;
