//! Appeal service
//!
//! Backs `POST /api/appeal`. The gate runs again on every submission; the
//! stored user id always comes from the resolved identity.

use appeal_core::Appeal;
use tracing::{info, instrument};

use crate::dto::{parse_submission, SubmitResponse};

use super::context::ServiceContext;
use super::error::{Refusal, ServiceError};
use super::gate::EligibilityGate;

/// Appeal service
pub struct AppealService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AppealService<'a> {
    /// Create a new AppealService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and store a new appeal
    ///
    /// Nothing is written unless the whole body validates. A conflicting
    /// concurrent write surfaces as `InProgress`.
    #[instrument(skip_all)]
    pub async fn submit(&self, token: Option<&str>, body: &[u8]) -> Result<SubmitResponse, Refusal> {
        let user = EligibilityGate::new(self.ctx).check(token).await?;

        let questions = match parse_submission(body) {
            Ok(questions) => questions,
            Err(e) => return Err(Refusal::for_user(e, user)),
        };

        let appeal = Appeal::submit(user.id, questions);
        if let Err(e) = self.ctx.appeal_repo().create(&appeal).await {
            return Err(Refusal::for_user(ServiceError::from(e), user));
        }

        info!(user_id = %user.id, answers = appeal.questions.len(), "Appeal submitted");
        Ok(SubmitResponse::submitted())
    }
}
