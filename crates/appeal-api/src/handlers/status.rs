//! Questionnaire status handler

use appeal_service::{dto::StatusResponse, StatusService};
use axum::{extract::State, Json};

use crate::extractors::SessionToken;
use crate::response::ApiResult;
use crate::state::AppState;

/// Who is logged in and which questions to answer
///
/// GET /api/status
pub async fn get_status(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<StatusResponse>> {
    let service = StatusService::new(state.service_context());
    let response = service.status(token.as_deref()).await?;
    Ok(Json(response))
}
