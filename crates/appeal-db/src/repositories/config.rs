//! PostgreSQL implementation of AppealConfigRepository

use appeal_core::{AppealConfig, AppealConfigRepository, RepoResult};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::models::AppealConfigModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AppealConfigRepository
#[derive(Clone)]
pub struct PgAppealConfigRepository {
    pool: PgPool,
}

impl PgAppealConfigRepository {
    /// Create a new PgAppealConfigRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace the questionnaire
    ///
    /// Operators edit the questions out of band; this is the programmatic
    /// equivalent used by tooling and tests.
    #[instrument(skip(self))]
    pub async fn set_questions(&self, questions: &[String]) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO appeal_config (id, questions)
            VALUES (TRUE, $1)
            ON CONFLICT (id) DO UPDATE SET questions = EXCLUDED.questions
            ",
        )
        .bind(sqlx::types::Json(questions))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl AppealConfigRepository for PgAppealConfigRepository {
    #[instrument(skip(self))]
    async fn get(&self) -> RepoResult<Option<AppealConfig>> {
        let result = sqlx::query_as::<_, AppealConfigModel>(
            r"
            SELECT questions
            FROM appeal_config
            WHERE id
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AppealConfig::from))
    }
}
