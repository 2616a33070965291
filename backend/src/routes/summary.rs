//! Daily summary route

use crate::error::ApiError;
use crate::services::SummaryService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use fitdiary_shared::types::{DateQuery, SummaryResponse};

/// Create summary routes
pub fn summary_routes() -> Router<AppState> {
    Router::new().route("/:telegram_id", get(daily_summary))
}

/// GET /api/v1/summary/:telegram_id?date=YYYY-MM-DD - Target vs consumed
async fn daily_summary(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    Ok(Json(
        SummaryService::daily_summary(&state, telegram_id, query.date).await?,
    ))
}
