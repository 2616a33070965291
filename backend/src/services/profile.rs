//! Profile service: survey intake, target computation and slot breakdowns

use fitdiary_shared::catalog;
use fitdiary_shared::meal_split::allocate_all;
use fitdiary_shared::metrics::compute_targets;
use fitdiary_shared::types::{ProfileResponse, SlotBreakdownResponse, SurveyRequest, UserRecord};
use fitdiary_shared::validation::build_profile;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub struct ProfileService;

impl ProfileService {
    /// Validate a survey submission, persist the profile and return the
    /// derived daily targets. Re-submitting overwrites the stored record.
    pub async fn submit_survey(state: &AppState, req: SurveyRequest) -> ApiResult<ProfileResponse> {
        let profile = build_profile(
            &req.gender,
            req.age,
            req.height_cm,
            req.weight_kg,
            &req.activity,
            &req.goal,
        )?;

        let user = UserRecord {
            telegram_id: req.telegram_id,
            name: req.name,
            username: req.username,
            preferences: req.preferences,
            profile,
        };
        state.profiles.put_user(&user).await?;

        let targets = compute_targets(&user.profile);
        info!(
            telegram_id = user.telegram_id,
            calories = targets.calories,
            "profile stored"
        );
        Ok(ProfileResponse { user, targets })
    }

    /// Fetch a stored profile with its targets recomputed on read
    pub async fn get_profile(state: &AppState, telegram_id: i64) -> ApiResult<ProfileResponse> {
        let user = state
            .profiles
            .get_user(telegram_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no profile for user {telegram_id}")))?;

        let targets = compute_targets(&user.profile);
        Ok(ProfileResponse { user, targets })
    }

    /// Split a user's daily targets across the slots of a preset
    pub async fn slot_breakdown(
        state: &AppState,
        telegram_id: i64,
        preset_id: &str,
    ) -> ApiResult<SlotBreakdownResponse> {
        let response = Self::get_profile(state, telegram_id).await?;
        let preset = catalog::find_preset(preset_id)
            .ok_or_else(|| ApiError::NotFound(format!("unknown meal split preset '{preset_id}'")))?;

        let daily = response.targets;
        Ok(SlotBreakdownResponse {
            preset_id: preset.id.clone(),
            daily,
            slots: allocate_all(&daily, preset),
        })
    }
}
