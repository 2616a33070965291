//! Daily summary: target vs consumed for one date
//!
//! The target side always comes from the stored profile through the one
//! canonical formula; the consumed side sums the date's logged meals on
//! read. Nothing here is cached.

use chrono::{NaiveDate, Utc};
use fitdiary_shared::metrics::compute_targets;
use fitdiary_shared::types::SummaryResponse;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub struct SummaryService;

impl SummaryService {
    /// Summary for a user on a date. When no date is given, the UI's
    /// selected date applies, falling back to today.
    pub async fn daily_summary(
        state: &AppState,
        telegram_id: i64,
        date: Option<NaiveDate>,
    ) -> ApiResult<SummaryResponse> {
        let user = state
            .profiles
            .get_user(telegram_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no profile for user {telegram_id}")))?;

        let date = match date {
            Some(date) => date,
            None => state
                .diary
                .selected_date()
                .await?
                .unwrap_or_else(|| Utc::now().date_naive()),
        };

        let entry = state.diary.get_entry_or_default(date).await?;
        Ok(SummaryResponse {
            target: compute_targets(&user.profile).into(),
            consumed: entry.consumed_totals().into(),
        })
    }
}
