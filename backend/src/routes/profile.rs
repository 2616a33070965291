//! Profile API routes: survey intake, stored profile and slot breakdowns

use crate::error::ApiError;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use fitdiary_shared::types::{ProfileResponse, SlotBreakdownResponse, SurveyRequest};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_survey))
        .route("/:telegram_id", get(get_profile))
        .route("/:telegram_id/slots/:preset_id", get(slot_breakdown))
}

/// POST /api/v1/profile - Submit the biometric survey
async fn submit_survey(
    State(state): State<AppState>,
    Json(req): Json<SurveyRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(ProfileService::submit_survey(&state, req).await?))
}

/// GET /api/v1/profile/:telegram_id - Stored profile with recomputed targets
async fn get_profile(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(ProfileService::get_profile(&state, telegram_id).await?))
}

/// GET /api/v1/profile/:telegram_id/slots/:preset_id - Daily targets split
/// across a preset's meal slots
async fn slot_breakdown(
    State(state): State<AppState>,
    Path((telegram_id, preset_id)): Path<(i64, String)>,
) -> Result<Json<SlotBreakdownResponse>, ApiError> {
    Ok(Json(
        ProfileService::slot_breakdown(&state, telegram_id, &preset_id).await?,
    ))
}
