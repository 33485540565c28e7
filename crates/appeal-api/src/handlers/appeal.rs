//! Appeal submission handler

use appeal_service::{dto::SubmitResponse, AppealService};
use axum::{body::Bytes, extract::State, Json};

use crate::extractors::SessionToken;
use crate::response::ApiResult;
use crate::state::AppState;

/// Submit the questionnaire
///
/// POST /api/appeal
///
/// Takes the raw body: it is parsed only after the gate passes, so an
/// unauthenticated caller gets 401 whatever they send.
pub async fn submit_appeal(
    State(state): State<AppState>,
    token: SessionToken,
    body: Bytes,
) -> ApiResult<Json<SubmitResponse>> {
    let service = AppealService::new(state.service_context());
    let response = service.submit(token.as_deref(), &body).await?;
    Ok(Json(response))
}
