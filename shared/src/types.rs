//! API request and response types

use crate::catalog::{ExerciseKind, RecipeIngredient};
use crate::diary::{ConsumedTotals, DiaryEntry, SleepRecord};
use crate::meal_split::SlotTargets;
use crate::metrics::{NutritionTargets, Profile};
use crate::portion::{PortionVariant, ScaledIngredient};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biometric survey submission, field names as sent by the mini-app
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRequest {
    pub telegram_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub gender: String,
    pub age: i64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal: String,
    pub activity: String,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Stored user record: identity plus the validated profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub telegram_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub preferences: Vec<String>,
    pub profile: Profile,
}

/// Survey response: the stored record and its derived targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserRecord,
    pub targets: NutritionTargets,
}

/// Per-slot breakdown for a selected preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotBreakdownResponse {
    pub preset_id: String,
    pub daily: NutritionTargets,
    pub slots: Vec<SlotTargets>,
}

/// Compact calorie/macro quadruple used by the summary endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroQuad {
    pub cal: i32,
    pub p: i32,
    pub f: i32,
    pub c: i32,
}

impl From<NutritionTargets> for MacroQuad {
    fn from(t: NutritionTargets) -> Self {
        MacroQuad {
            cal: t.calories,
            p: t.protein_g,
            f: t.fat_g,
            c: t.carbs_g,
        }
    }
}

impl From<ConsumedTotals> for MacroQuad {
    fn from(t: ConsumedTotals) -> Self {
        MacroQuad {
            cal: t.calories,
            p: t.protein_g,
            f: t.fat_g,
            c: t.carbs_g,
        }
    }
}

/// Daily summary: targets vs consumed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub target: MacroQuad,
    pub consumed: MacroQuad,
}

/// One diary entry with its derived totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntryResponse {
    pub date: NaiveDate,
    pub entry: DiaryEntry,
    pub totals: ConsumedTotals,
}

/// Manually authored meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMealRequest {
    pub title: String,
    pub calories: i32,
    #[serde(default)]
    pub protein_g: i32,
    #[serde(default)]
    pub fat_g: i32,
    #[serde(default)]
    pub carbs_g: i32,
}

/// Log a catalog recipe scaled to a calorie target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecipeRequest {
    pub recipe_slug: String,
    pub target_calories: i32,
}

/// Manually authored workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWorkoutRequest {
    pub name: String,
    #[serde(default)]
    pub kind: Option<ExerciseKind>,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub duration_min: Option<u32>,
}

/// Expand a catalog workout template into the day's workout list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandTemplateRequest {
    pub template_slug: String,
}

/// Water setter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetWaterRequest {
    pub liters: f64,
}

/// Sleep setter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSleepRequest {
    #[serde(flatten)]
    pub sleep: SleepRecord,
}

/// Rest-day setter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRestDayRequest {
    pub is_rest_day: bool,
}

/// Selected-date getter/setter payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedDate {
    pub date: NaiveDate,
}

/// Catalog recipe with computed nutrition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub slug: String,
    pub title: String,
    pub meal_type: crate::meal_split::MealSlot,
    pub base_servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
    pub total_calories: i32,
    pub per_portion_calories: i32,
}

/// Portion variants for a recipe, with the closest pick when a target
/// was supplied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortionVariantsResponse {
    pub slug: String,
    pub variants: Vec<PortionVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<PortionVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<ScaledIngredient>>,
}

/// Optional date query parameter
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DateQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Optional target-calories query parameter
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TargetQuery {
    #[serde(default)]
    pub target: Option<i32>,
}

/// Structured API error body: `{ok: false, error: {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
