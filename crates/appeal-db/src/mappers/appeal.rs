//! Appeal entity <-> model mappers

use appeal_core::{Appeal, AppealConfig, AppealQuestion, AppealStatus, DomainError, Snowflake};
use chrono::{DateTime, Utc};
use sqlx::types::Json;

use crate::models::{AppealConfigModel, AppealModel};

impl TryFrom<AppealModel> for Appeal {
    type Error = DomainError;

    fn try_from(model: AppealModel) -> Result<Self, Self::Error> {
        let status: AppealStatus = model
            .status
            .parse()
            .map_err(|e: appeal_core::UnknownAppealStatus| {
                DomainError::CorruptRecord(format!("appeal {}: {e}", model.user_id))
            })?;

        Ok(Appeal {
            user_id: Snowflake::new(model.user_id),
            status,
            questions: model.questions.0,
            created_at: model.created_at,
        })
    }
}

impl From<AppealConfigModel> for AppealConfig {
    fn from(model: AppealConfigModel) -> Self {
        AppealConfig::new(model.questions.0)
    }
}

/// Data for inserting a new appeal
#[derive(Debug)]
pub struct AppealInsert<'a> {
    pub user_id: i64,
    pub status: &'static str,
    pub questions: Json<&'a [AppealQuestion]>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Appeal> for AppealInsert<'a> {
    fn from(appeal: &'a Appeal) -> Self {
        Self {
            user_id: appeal.user_id.into_inner(),
            status: appeal.status.as_str(),
            questions: Json(appeal.questions.as_slice()),
            created_at: appeal.created_at,
        }
    }
}
