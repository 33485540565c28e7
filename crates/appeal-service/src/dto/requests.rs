//! Request DTOs for API endpoints
//!
//! The submission body is parsed by hand from raw bytes so that each way it
//! can be malformed maps to its own user-facing message.

use appeal_core::AppealQuestion;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::services::ServiceError;

/// Message for a body without a `questions` array
pub const QUESTIONS_NOT_PROVIDED: &str = "questions not provided";

/// Message for a malformed or out-of-bounds question/answer pair
pub const INVALID_QUESTION_ANSWER: &str = "invalid question/answer";

/// One question/answer pair of a submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerInput {
    pub question: String,

    #[validate(length(min = 10, max = 500))]
    pub answer: String,
}

impl From<AnswerInput> for AppealQuestion {
    fn from(input: AnswerInput) -> Self {
        AppealQuestion::new(input.question, input.answer)
    }
}

/// Parse and validate a submission body
///
/// Checks, in order: the body is JSON; it has a `questions` array; every
/// element is an object with string `question` and `answer`
/// and the answer length is within bounds. Extra fields are ignored, and an
/// empty array passes with no questions.
pub fn parse_submission(body: &[u8]) -> Result<Vec<AppealQuestion>, ServiceError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ServiceError::validation(e.to_string()))?;

    let items = match value.get("questions") {
        Some(Value::Array(items)) => items,
        _ => return Err(ServiceError::validation(QUESTIONS_NOT_PROVIDED)),
    };

    items
        .iter()
        .map(|item| {
            let input = AnswerInput::deserialize(item)
                .map_err(|_| ServiceError::validation(INVALID_QUESTION_ANSWER))?;
            input
                .validate()
                .map_err(|_| ServiceError::validation(INVALID_QUESTION_ANSWER))?;
            Ok(input.into())
        })
        .collect()
}

/// Query of the OAuth redirect back from Discord
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
}
