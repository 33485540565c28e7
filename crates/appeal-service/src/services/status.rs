//! Status service
//!
//! Backs `GET /api/status`: run the gate, then hand out the questionnaire.

use appeal_core::AppealConfig;
use tracing::{debug, instrument};

use crate::dto::StatusResponse;

use super::context::ServiceContext;
use super::error::{Refusal, ServiceError};
use super::gate::EligibilityGate;

/// Status service
pub struct StatusService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatusService<'a> {
    /// Create a new StatusService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Tell the caller whether they may appeal, with the questions if so
    #[instrument(skip_all)]
    pub async fn status(&self, token: Option<&str>) -> Result<StatusResponse, Refusal> {
        let user = EligibilityGate::new(self.ctx).check(token).await?;

        let config = match self.ctx.config_repo().get().await {
            Ok(config) => config,
            Err(e) => return Err(Refusal::for_user(ServiceError::upstream(e), user)),
        };
        let questions = AppealConfig::effective_questions(config);
        debug!(count = questions.len(), "Serving questionnaire");

        Ok(StatusResponse { user, questions })
    }
}
