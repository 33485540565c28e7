//! Test fixtures
//!
//! Response shapes and submission bodies shared by the API tests.

use appeal_core::{Identity, Notice};
use serde::Deserialize;
use serde_json::{json, Value};

/// An answer comfortably inside the length bounds
pub const GOOD_ANSWER: &str = "I broke the rules and I understand why that was wrong.";

/// Failure body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Notice,
    pub user: Option<Identity>,
}

/// Success body of a submission
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: Notice,
}

/// Body of a successful status check
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub user: Identity,
    pub questions: Vec<String>,
}

/// A submission answering every question with the same answer
pub fn submission(questions: &[String], answer: &str) -> Value {
    let questions: Vec<Value> = questions
        .iter()
        .map(|q| json!({ "question": q, "answer": answer }))
        .collect();
    json!({ "questions": questions })
}

/// A one-question submission
pub fn single_answer(answer: &str) -> Value {
    json!({ "questions": [{ "question": "Why were you banned?", "answer": answer }] })
}
