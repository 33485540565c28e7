//! Answer length rule shared by the submission pipeline and the form model

use thiserror::Error;

/// Minimum answer length in characters (inclusive)
pub const MIN_ANSWER_CHARS: usize = 10;

/// Maximum answer length in characters (inclusive)
pub const MAX_ANSWER_CHARS: usize = 500;

/// Why an answer was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("Must be at least {MIN_ANSWER_CHARS} characters.")]
    TooShort,

    #[error("Must be at most {MAX_ANSWER_CHARS} characters.")]
    TooLong,
}

/// Check an answer against the inclusive `10..=500` character bound
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn validate_answer(answer: &str) -> Result<(), AnswerError> {
    let len = answer.chars().count();
    if len < MIN_ANSWER_CHARS {
        Err(AnswerError::TooShort)
    } else if len > MAX_ANSWER_CHARS {
        Err(AnswerError::TooLong)
    } else {
        Ok(())
    }
}
