//! # appeal-core
//!
//! Domain layer for the ban appeal service: appeal entities, the answer length
//! rule, the client-side form model, and the ports implemented by the
//! infrastructure crates. Nothing here knows about HTTP or SQL.

pub mod entities;
pub mod error;
pub mod form;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Appeal, AppealConfig, AppealQuestion, AppealStatus, BanRecord, Identity,
    UnknownAppealStatus, DEFAULT_QUESTIONS,
};
pub use error::DomainError;
pub use form::{AppealForm, FormSession, Notice, Profile, Scene, StatusOutcome};
pub use traits::{
    AccessGrant, AppealConfigRepository, AppealRepository, IdentityProvider, OAuthClient,
    RepoResult,
};
pub use validation::{validate_answer, AnswerError, MAX_ANSWER_CHARS, MIN_ANSWER_CHARS};
pub use value_objects::{Snowflake, SnowflakeParseError};
