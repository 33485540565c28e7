//! PostgreSQL implementation of AppealRepository

use appeal_core::{Appeal, AppealRepository, RepoResult, Snowflake};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::mappers::AppealInsert;
use crate::models::AppealModel;

use super::error::{appeal_exists, map_db_error, map_unique_violation};

/// PostgreSQL implementation of AppealRepository
#[derive(Clone)]
pub struct PgAppealRepository {
    pool: PgPool,
}

impl PgAppealRepository {
    /// Create a new PgAppealRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppealRepository for PgAppealRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Appeal>> {
        let result = sqlx::query_as::<_, AppealModel>(
            r"
            SELECT user_id, status, questions, created_at
            FROM appeals
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Appeal::try_from).transpose()
    }

    #[instrument(skip(self, appeal), fields(user_id = %appeal.user_id))]
    async fn create(&self, appeal: &Appeal) -> RepoResult<()> {
        let insert = AppealInsert::from(appeal);

        // The primary key arbitrates concurrent submissions: the loser
        // affects zero rows.
        let result = sqlx::query(
            r"
            INSERT INTO appeals (user_id, status, questions, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(insert.user_id)
        .bind(insert.status)
        .bind(insert.questions)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || appeal_exists(appeal.user_id)))?;

        if result.rows_affected() == 0 {
            debug!("Appeal already on file, nothing written");
            return Err(appeal_exists(appeal.user_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
