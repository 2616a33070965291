//! Diary API routes: per-date entries and their mutations

use crate::error::ApiError;
use crate::services::DiaryService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use fitdiary_shared::types::{
    AddMealRequest, AddWorkoutRequest, DiaryEntryResponse, ExpandTemplateRequest,
    LogRecipeRequest, SelectedDate, SetRestDayRequest, SetSleepRequest, SetWaterRequest,
};

/// Create diary routes
pub fn diary_routes() -> Router<AppState> {
    Router::new()
        .route("/selected-date", get(get_selected_date).put(set_selected_date))
        .route("/:date", get(get_entry))
        .route("/:date/meals", post(add_meal))
        .route("/:date/meals/recipe", post(log_recipe))
        .route("/:date/workouts", post(add_workout))
        .route("/:date/workouts/template", post(expand_template))
        .route("/:date/items/:item_id/toggle", post(toggle_done))
        .route("/:date/items/:item_id", delete(delete_item))
        .route("/:date/rest-day", put(set_rest_day))
        .route("/:date/water", put(set_water))
        .route("/:date/sleep", put(set_sleep))
}

/// GET /api/v1/diary/selected-date - The UI's selected date
async fn get_selected_date(
    State(state): State<AppState>,
) -> Result<Json<SelectedDate>, ApiError> {
    Ok(Json(DiaryService::selected_date(&state).await?))
}

/// PUT /api/v1/diary/selected-date - Store the UI's selected date
async fn set_selected_date(
    State(state): State<AppState>,
    Json(req): Json<SelectedDate>,
) -> Result<Json<SelectedDate>, ApiError> {
    Ok(Json(DiaryService::set_selected_date(&state, req.date).await?))
}

/// GET /api/v1/diary/:date - The entry for a date with derived totals
async fn get_entry(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(DiaryService::get_entry(&state, date).await?))
}

/// POST /api/v1/diary/:date/meals - Log a manually authored meal
async fn add_meal(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(req): Json<AddMealRequest>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(DiaryService::add_meal(&state, date, req).await?))
}

/// POST /api/v1/diary/:date/meals/recipe - Log a scaled catalog recipe
async fn log_recipe(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(req): Json<LogRecipeRequest>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(DiaryService::log_recipe(&state, date, req).await?))
}

/// POST /api/v1/diary/:date/workouts - Log a manually authored workout
async fn add_workout(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(req): Json<AddWorkoutRequest>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(DiaryService::add_workout(&state, date, req).await?))
}

/// POST /api/v1/diary/:date/workouts/template - Expand a workout template
async fn expand_template(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(req): Json<ExpandTemplateRequest>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(
        DiaryService::expand_template(&state, date, &req.template_slug).await?,
    ))
}

/// POST /api/v1/diary/:date/items/:item_id/toggle - Flip an item's done flag
async fn toggle_done(
    State(state): State<AppState>,
    Path((date, item_id)): Path<(NaiveDate, String)>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(DiaryService::toggle_done(&state, date, &item_id).await?))
}

/// DELETE /api/v1/diary/:date/items/:item_id - Delete an item
async fn delete_item(
    State(state): State<AppState>,
    Path((date, item_id)): Path<(NaiveDate, String)>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(DiaryService::delete_item(&state, date, &item_id).await?))
}

/// PUT /api/v1/diary/:date/rest-day - Set the rest-day flag
async fn set_rest_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(req): Json<SetRestDayRequest>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(
        DiaryService::set_rest_day(&state, date, req.is_rest_day).await?,
    ))
}

/// PUT /api/v1/diary/:date/water - Replace the day's water total
async fn set_water(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(req): Json<SetWaterRequest>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(DiaryService::set_water(&state, date, req.liters).await?))
}

/// PUT /api/v1/diary/:date/sleep - Replace the day's sleep record
async fn set_sleep(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(req): Json<SetSleepRequest>,
) -> Result<Json<DiaryEntryResponse>, ApiError> {
    Ok(Json(DiaryService::set_sleep(&state, date, req.sleep).await?))
}
