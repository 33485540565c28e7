//! Questionnaire configuration

use serde::{Deserialize, Serialize};

/// Questions shown when no configuration has been stored
pub const DEFAULT_QUESTIONS: [&str; 3] = [
    "Who banned you?",
    "Why do you think you were banned?",
    "Are you sorry?",
];

/// Singleton questionnaire configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealConfig {
    #[serde(default)]
    pub questions: Vec<String>,
}

impl AppealConfig {
    pub fn new(questions: Vec<String>) -> Self {
        Self { questions }
    }

    /// Questions to present, falling back to [`DEFAULT_QUESTIONS`] when empty
    pub fn effective_questions(config: Option<Self>) -> Vec<String> {
        match config {
            Some(config) if !config.questions.is_empty() => config.questions,
            _ => DEFAULT_QUESTIONS.iter().map(|q| (*q).to_string()).collect(),
        }
    }
}
