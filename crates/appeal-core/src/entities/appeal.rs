//! Appeal entity - a questionnaire submitted by a banned user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Review state of an appeal
///
/// Appeals are created as `Polling`. Every later transition is made by the
/// moderation side, never by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppealStatus {
    /// Submitted, not yet picked up by a reviewer
    Polling,
    /// Picked up, awaiting a decision
    Pending,
    Rejected,
    Accepted,
}

impl AppealStatus {
    /// Wire and storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polling => "polling",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
        }
    }

    /// Whether a reviewer has reached a final decision
    #[inline]
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for AppealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a status string outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown appeal status: {0}")]
pub struct UnknownAppealStatus(pub String);

impl FromStr for AppealStatus {
    type Err = UnknownAppealStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polling" => Ok(Self::Polling),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            "accepted" => Ok(Self::Accepted),
            other => Err(UnknownAppealStatus(other.to_string())),
        }
    }
}

/// One answered question of an appeal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealQuestion {
    pub question: String,
    pub answer: String,
}

impl AppealQuestion {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A ban appeal, at most one per user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appeal {
    pub user_id: Snowflake,
    pub status: AppealStatus,
    pub questions: Vec<AppealQuestion>,
    pub created_at: DateTime<Utc>,
}

impl Appeal {
    /// Create a freshly submitted appeal in the `Polling` state
    pub fn submit(user_id: Snowflake, questions: Vec<AppealQuestion>) -> Self {
        Self {
            user_id,
            status: AppealStatus::Polling,
            questions,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            AppealStatus::Polling,
            AppealStatus::Pending,
            AppealStatus::Rejected,
            AppealStatus::Accepted,
        ] {
            assert_eq!(status.as_str().parse::<AppealStatus>().unwrap(), status);
        }
        assert_eq!(
            "closed".parse::<AppealStatus>(),
            Err(UnknownAppealStatus("closed".to_string()))
        );
    }

    #[test]
    fn test_status_is_decided() {
        assert!(AppealStatus::Accepted.is_decided());
        assert!(AppealStatus::Rejected.is_decided());
        assert!(!AppealStatus::Polling.is_decided());
        assert!(!AppealStatus::Pending.is_decided());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AppealStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }

    #[test]
    fn test_submit_starts_polling() {
        let before = Utc::now();
        let appeal = Appeal::submit(
            Snowflake::new(42),
            vec![AppealQuestion::new("Are you sorry?", "Yes, very sorry.")],
        );
        assert_eq!(appeal.status, AppealStatus::Polling);
        assert_eq!(appeal.user_id, Snowflake::new(42));
        assert_eq!(appeal.questions.len(), 1);
        assert!(appeal.created_at >= before);
    }
}
