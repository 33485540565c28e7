//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::{parse_submission, AnswerInput, OAuthCallbackQuery};
pub use responses::{
    HealthChecks, HealthResponse, ReadinessResponse, StatusResponse, SubmitResponse,
};
