//! Appeal form model
//!
//! Mirrors what the browser does with the `/api/status` response: show a
//! notice, or render one answer field per question and keep a single
//! "submit enabled" flag in sync with the answer rule. The server revalidates
//! every submission, so this model is a convenience, never the enforcement
//! point.

use serde::{Deserialize, Serialize};

use crate::entities::{AppealQuestion, Identity};
use crate::validation::{validate_answer, AnswerError};

/// Title and description shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// What the status endpoint told the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// Eligible: render the questionnaire
    Questions {
        user: Option<Identity>,
        questions: Vec<String>,
    },
    /// Not eligible, or not logged in
    Refused {
        notice: Notice,
        user: Option<Identity>,
    },
}

/// Which part of the page is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Connecting,
    Error,
    Appeal,
}

#[derive(Debug, Clone)]
struct AnswerField {
    question: String,
    answer: String,
    error: Option<AnswerError>,
}

/// Answer fields for a questionnaire plus the aggregate submit flag
#[derive(Debug, Clone)]
pub struct AppealForm {
    fields: Vec<AnswerField>,
    submit_enabled: bool,
}

impl AppealForm {
    /// Build a form with one empty answer per question
    pub fn new(questions: Vec<String>) -> Self {
        let fields = questions
            .into_iter()
            .map(|question| AnswerField {
                question,
                answer: String::new(),
                error: None,
            })
            .collect();

        // Starts disabled, like the rendered submit button
        Self {
            fields,
            submit_enabled: false,
        }
    }

    /// Number of answer fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Question text of a field
    pub fn question(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|f| f.question.as_str())
    }

    /// Current answer of a field
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|f| f.answer.as_str())
    }

    /// Message shown under a field, set when that field was last edited
    pub fn field_error(&self, index: usize) -> Option<AnswerError> {
        self.fields.get(index).and_then(|f| f.error)
    }

    /// Replace the answer of one field and recompute the submit flag
    ///
    /// Only the edited field's message is refreshed; the others are checked
    /// silently. Returns the new submit flag. Out-of-range indices are ignored.
    pub fn input(&mut self, index: usize, value: impl Into<String>) -> bool {
        if let Some(field) = self.fields.get_mut(index) {
            field.answer = value.into();
            field.error = validate_answer(&field.answer).err();
            self.submit_enabled = self
                .fields
                .iter()
                .all(|f| validate_answer(&f.answer).is_ok());
        }
        self.submit_enabled
    }

    /// Whether every answer satisfies the rule
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Question/answer pairs in question order, or `None` while submit is disabled
    pub fn submission(&self) -> Option<Vec<AppealQuestion>> {
        if !self.submit_enabled {
            return None;
        }
        Some(
            self.fields
                .iter()
                .map(|f| AppealQuestion::new(f.question.clone(), f.answer.clone()))
                .collect(),
        )
    }
}

/// Name and avatar shown in the page header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub tag: String,
    pub avatar_url: String,
}

/// Page state: starts connecting, then settles once on error or appeal
#[derive(Debug, Clone)]
pub struct FormSession {
    scene: Scene,
    user: Option<Identity>,
    notice: Option<Notice>,
    form: Option<AppealForm>,
}

impl FormSession {
    pub fn connecting() -> Self {
        Self {
            scene: Scene::Connecting,
            user: None,
            notice: None,
            form: None,
        }
    }

    /// Apply the status response
    ///
    /// Only the first call changes the scene; later calls return `false`
    /// and leave the session untouched.
    pub fn load(&mut self, outcome: StatusOutcome) -> bool {
        if self.scene != Scene::Connecting {
            return false;
        }

        match outcome {
            StatusOutcome::Questions { user, questions } => {
                self.user = user;
                self.form = Some(AppealForm::new(questions));
                self.scene = Scene::Appeal;
            }
            StatusOutcome::Refused { notice, user } => {
                self.user = user;
                self.notice = Some(notice);
                self.scene = Scene::Error;
            }
        }
        true
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Logged-in user, when the server sent one
    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    /// Header card for the logged-in user, in either scene
    pub fn profile(&self) -> Option<Profile> {
        self.user.as_ref().map(|user| Profile {
            tag: user.tag(),
            avatar_url: user.avatar_url(),
        })
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn form(&self) -> Option<&AppealForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut AppealForm> {
        self.form.as_mut()
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::connecting()
    }
}
