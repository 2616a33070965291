//! Diary service: persisted read-modify-write over per-date entries
//!
//! Every mutation runs as read -> pure transform -> overwrite while
//! holding that date's async mutex, so concurrent writers to the same
//! date cannot drop each other's updates. Reads take no lock.

use chrono::{NaiveDate, Utc};
use fitdiary_shared::catalog;
use fitdiary_shared::diary::{
    self, DiaryEntry, DiaryMealRecord, DiaryWorkoutRecord, SleepRecord,
};
use fitdiary_shared::portion::{self, DEFAULT_CALORIE_STEPS};
use fitdiary_shared::types::{
    AddMealRequest, AddWorkoutRequest, DiaryEntryResponse, LogRecipeRequest, SelectedDate,
};
use fitdiary_shared::validation::{validate_sleep_quality, validate_water_l};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub struct DiaryService;

impl DiaryService {
    /// Fetch the entry for a date; absent dates yield a zeroed default
    /// without writing anything.
    pub async fn get_entry(state: &AppState, date: NaiveDate) -> ApiResult<DiaryEntryResponse> {
        let entry = state.diary.get_entry_or_default(date).await?;
        Ok(respond(date, entry))
    }

    /// Append a manually authored meal
    pub async fn add_meal(
        state: &AppState,
        date: NaiveDate,
        req: AddMealRequest,
    ) -> ApiResult<DiaryEntryResponse> {
        if req.title.trim().is_empty() {
            return Err(ApiError::Validation {
                field: Some("title".to_string()),
                message: "is required".to_string(),
            });
        }
        if req.calories < 0 {
            return Err(ApiError::Validation {
                field: Some("calories".to_string()),
                message: "cannot be negative".to_string(),
            });
        }

        Self::mutate(state, date, move |entry| {
            let id = diary::add_meal(
                entry,
                DiaryMealRecord {
                    id: String::new(),
                    title: req.title,
                    calories: req.calories,
                    protein_g: req.protein_g,
                    fat_g: req.fat_g,
                    carbs_g: req.carbs_g,
                    done: false,
                },
            );
            debug!(%date, meal_id = %id, "meal logged");
            Ok(())
        })
        .await
    }

    /// Scale a catalog recipe to the requested calories and log the
    /// resulting portion as a meal.
    pub async fn log_recipe(
        state: &AppState,
        date: NaiveDate,
        req: LogRecipeRequest,
    ) -> ApiResult<DiaryEntryResponse> {
        let recipe = catalog::find_recipe(&req.recipe_slug)
            .ok_or_else(|| ApiError::NotFound(format!("unknown recipe '{}'", req.recipe_slug)))?;
        if req.target_calories <= 0 {
            return Err(ApiError::Validation {
                field: Some("targetCalories".to_string()),
                message: "must be positive".to_string(),
            });
        }

        let variants = portion::portion_variants(recipe, &catalog::INGREDIENTS, &DEFAULT_CALORIE_STEPS);
        let variant = portion::select_variant(&variants, req.target_calories)
            .cloned()
            .ok_or_else(|| ApiError::BadRequest("recipe has no portion variants".to_string()))?;

        Self::mutate(state, date, move |entry| {
            let meal = diary::meal_from_portion(&recipe.title, &variant);
            diary::add_meal(entry, meal);
            Ok(())
        })
        .await
    }

    /// Append a manually authored workout
    pub async fn add_workout(
        state: &AppState,
        date: NaiveDate,
        req: AddWorkoutRequest,
    ) -> ApiResult<DiaryEntryResponse> {
        if req.name.trim().is_empty() {
            return Err(ApiError::Validation {
                field: Some("name".to_string()),
                message: "is required".to_string(),
            });
        }

        Self::mutate(state, date, move |entry| {
            diary::add_workout(
                entry,
                DiaryWorkoutRecord {
                    id: String::new(),
                    name: req.name,
                    kind: req.kind,
                    sets: req.sets,
                    reps: req.reps,
                    weight_kg: req.weight_kg,
                    duration_min: req.duration_min,
                    source_template: None,
                    done: false,
                },
            );
            Ok(())
        })
        .await
    }

    /// Expand a catalog workout template into the day in one batch
    pub async fn expand_template(
        state: &AppState,
        date: NaiveDate,
        template_slug: &str,
    ) -> ApiResult<DiaryEntryResponse> {
        let template = catalog::find_workout_template(template_slug)
            .ok_or_else(|| ApiError::NotFound(format!("unknown workout template '{template_slug}'")))?;

        Self::mutate(state, date, move |entry| {
            let ids = diary::expand_workout_template(entry, template);
            debug!(%date, template = %template.slug, count = ids.len(), "template expanded");
            Ok(())
        })
        .await
    }

    /// Flip an item's done flag; stale ids are a no-op
    pub async fn toggle_done(
        state: &AppState,
        date: NaiveDate,
        item_id: &str,
    ) -> ApiResult<DiaryEntryResponse> {
        let item_id = item_id.to_string();
        Self::mutate(state, date, move |entry| {
            if !diary::toggle_done(entry, &item_id) {
                debug!(%date, %item_id, "toggle of unknown id ignored");
            }
            Ok(())
        })
        .await
    }

    /// Delete an item by id; stale ids are a no-op
    pub async fn delete_item(
        state: &AppState,
        date: NaiveDate,
        item_id: &str,
    ) -> ApiResult<DiaryEntryResponse> {
        let item_id = item_id.to_string();
        Self::mutate(state, date, move |entry| {
            diary::delete_item(entry, &item_id);
            Ok(())
        })
        .await
    }

    /// Set the rest-day flag; setting it clears the workout list
    pub async fn set_rest_day(
        state: &AppState,
        date: NaiveDate,
        is_rest_day: bool,
    ) -> ApiResult<DiaryEntryResponse> {
        Self::mutate(state, date, move |entry| {
            diary::set_rest_day(entry, is_rest_day);
            Ok(())
        })
        .await
    }

    /// Replace the day's water total
    pub async fn set_water(
        state: &AppState,
        date: NaiveDate,
        liters: f64,
    ) -> ApiResult<DiaryEntryResponse> {
        let liters = validate_water_l(liters)?;
        Self::mutate(state, date, move |entry| {
            diary::set_water(entry, liters);
            Ok(())
        })
        .await
    }

    /// Replace the day's sleep record
    pub async fn set_sleep(
        state: &AppState,
        date: NaiveDate,
        sleep: SleepRecord,
    ) -> ApiResult<DiaryEntryResponse> {
        if let Some(quality) = sleep.quality {
            validate_sleep_quality(quality)?;
        }
        Self::mutate(state, date, move |entry| {
            diary::set_sleep(entry, sleep);
            Ok(())
        })
        .await
    }

    /// The UI's selected date; today when none was ever stored
    pub async fn selected_date(state: &AppState) -> ApiResult<SelectedDate> {
        let date = state
            .diary
            .selected_date()
            .await?
            .unwrap_or_else(|| Utc::now().date_naive());
        Ok(SelectedDate { date })
    }

    pub async fn set_selected_date(state: &AppState, date: NaiveDate) -> ApiResult<SelectedDate> {
        state.diary.set_selected_date(date).await?;
        Ok(SelectedDate { date })
    }

    /// Read -> transform -> overwrite, serialized per date
    async fn mutate<F>(state: &AppState, date: NaiveDate, op: F) -> ApiResult<DiaryEntryResponse>
    where
        F: FnOnce(&mut DiaryEntry) -> ApiResult<()>,
    {
        let _guard = state.date_locks.acquire(date).await;
        let mut entry = state.diary.get_entry_or_default(date).await?;
        op(&mut entry)?;
        state.diary.put_entry(date, &entry).await?;
        Ok(respond(date, entry))
    }
}

fn respond(date: NaiveDate, entry: DiaryEntry) -> DiaryEntryResponse {
    let totals = entry.consumed_totals();
    DiaryEntryResponse {
        date,
        entry,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::repositories::MemoryStore;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::new(AppConfig::default(), Arc::new(MemoryStore::new()))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    fn meal_req(title: &str, calories: i32) -> AddMealRequest {
        AddMealRequest {
            title: title.to_string(),
            calories,
            protein_g: 20,
            fat_g: 10,
            carbs_g: 40,
        }
    }

    #[tokio::test]
    async fn test_get_absent_date_is_zeroed_and_not_created() {
        let state = test_state();
        let response = DiaryService::get_entry(&state, date()).await.unwrap();
        assert_eq!(response.entry, DiaryEntry::default());
        assert_eq!(response.totals.calories, 0);

        // the read must not have persisted anything
        assert!(state.diary.get_entry(date()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_meal_persists_and_totals_update() {
        let state = test_state();
        DiaryService::add_meal(&state, date(), meal_req("Breakfast", 400))
            .await
            .unwrap();
        let response = DiaryService::add_meal(&state, date(), meal_req("Lunch", 600))
            .await
            .unwrap();

        assert_eq!(response.entry.meals.len(), 2);
        assert_eq!(response.totals.calories, 1000);
        assert_eq!(response.totals.protein_g, 40);

        let stored = state.diary.get_entry(date()).await.unwrap().unwrap();
        assert_eq!(stored.meals.len(), 2);
    }

    #[tokio::test]
    async fn test_add_meal_rejects_blank_title() {
        let state = test_state();
        let err = DiaryService::add_meal(&state, date(), meal_req("  ", 400))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_log_recipe_snapshot_carries_variant_macros() {
        let state = test_state();
        let response = DiaryService::log_recipe(
            &state,
            date(),
            LogRecipeRequest {
                recipe_slug: "banana-oatmeal".to_string(),
                target_calories: 430,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.entry.meals.len(), 1);
        let meal = &response.entry.meals[0];
        assert_eq!(meal.title, "Banana oatmeal");
        // closest fixed step to 430
        assert_eq!(meal.calories, 400);
    }

    #[tokio::test]
    async fn test_log_recipe_unknown_slug() {
        let state = test_state();
        let err = DiaryService::log_recipe(
            &state,
            date(),
            LogRecipeRequest {
                recipe_slug: "no-such-dish".to_string(),
                target_calories: 500,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_expand_template_then_rest_day_clears() {
        let state = test_state();
        let response = DiaryService::expand_template(&state, date(), "full-body-a")
            .await
            .unwrap();
        assert_eq!(response.entry.workouts.len(), 4);

        let response = DiaryService::set_rest_day(&state, date(), true).await.unwrap();
        assert!(response.entry.is_rest_day);
        assert!(response.entry.workouts.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_and_delete_roundtrip() {
        let state = test_state();
        let response = DiaryService::add_meal(&state, date(), meal_req("Dinner", 500))
            .await
            .unwrap();
        let id = response.entry.meals[0].id.clone();

        let response = DiaryService::toggle_done(&state, date(), &id).await.unwrap();
        assert!(response.entry.meals[0].done);

        // stale id: state unchanged, not an error
        let response = DiaryService::toggle_done(&state, date(), "stale-id").await.unwrap();
        assert!(response.entry.meals[0].done);

        let response = DiaryService::delete_item(&state, date(), &id).await.unwrap();
        assert!(response.entry.meals.is_empty());
        assert_eq!(response.totals.calories, 0);
    }

    #[tokio::test]
    async fn test_water_validation_and_replacement() {
        let state = test_state();
        let response = DiaryService::set_water(&state, date(), 1.5).await.unwrap();
        assert_eq!(response.entry.water_l, 1.5);

        let err = DiaryService::set_water(&state, date(), -1.0).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));

        // failed validation must not have clobbered the stored value
        let response = DiaryService::get_entry(&state, date()).await.unwrap();
        assert_eq!(response.entry.water_l, 1.5);
    }

    #[tokio::test]
    async fn test_sleep_quality_bounds() {
        let state = test_state();
        let sleep = SleepRecord {
            start: Some("23:00".to_string()),
            end: Some("07:00".to_string()),
            quality: Some(4),
        };
        let response = DiaryService::set_sleep(&state, date(), sleep).await.unwrap();
        assert_eq!(response.entry.sleep.quality, Some(4));

        let bad = SleepRecord {
            quality: Some(9),
            ..Default::default()
        };
        let err = DiaryService::set_sleep(&state, date(), bad).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_selected_date_defaults_to_today() {
        let state = test_state();
        let selected = DiaryService::selected_date(&state).await.unwrap();
        assert_eq!(selected.date, Utc::now().date_naive());

        let chosen = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        DiaryService::set_selected_date(&state, chosen).await.unwrap();
        let selected = DiaryService::selected_date(&state).await.unwrap();
        assert_eq!(selected.date, chosen);
    }

    #[tokio::test]
    async fn test_dates_are_isolated() {
        let state = test_state();
        let other = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        DiaryService::add_meal(&state, date(), meal_req("A", 300)).await.unwrap();

        let response = DiaryService::get_entry(&state, other).await.unwrap();
        assert!(response.entry.meals.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_meal_logging_drops_nothing() {
        let state = test_state();
        let mut handles = Vec::new();
        for i in 0..10 {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                DiaryService::add_meal(&state, date(), meal_req(&format!("Meal {i}"), 100))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let response = DiaryService::get_entry(&state, date()).await.unwrap();
        assert_eq!(response.entry.meals.len(), 10);
        assert_eq!(response.totals.calories, 1000);
    }
}
