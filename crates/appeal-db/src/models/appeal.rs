//! Appeal database model

use appeal_core::AppealQuestion;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for appeals table
#[derive(Debug, Clone, FromRow)]
pub struct AppealModel {
    pub user_id: i64,
    pub status: String,
    pub questions: Json<Vec<AppealQuestion>>,
    pub created_at: DateTime<Utc>,
}
