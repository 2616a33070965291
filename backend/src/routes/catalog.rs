//! Catalog API routes: recipes, portion variants, workout templates and
//! meal split presets
//!
//! Catalog data is static, so these handlers are pure reads over the
//! built-in tables with nutrition computed on the fly.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use fitdiary_shared::catalog::{self, RecipeDefinition, WorkoutTemplate};
use fitdiary_shared::meal_split::MealSplitPreset;
use fitdiary_shared::portion::{self, DEFAULT_CALORIE_STEPS};
use fitdiary_shared::types::{PortionVariantsResponse, RecipeResponse, TargetQuery};

/// Create catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:slug", get(get_recipe))
        .route("/recipes/:slug/portions", get(recipe_portions))
        .route("/workouts", get(list_workout_templates))
        .route("/presets", get(list_presets))
}

fn recipe_response(recipe: &RecipeDefinition) -> RecipeResponse {
    let nutrition = portion::recipe_nutrition(recipe, &catalog::INGREDIENTS);
    RecipeResponse {
        slug: recipe.slug.clone(),
        title: recipe.title.clone(),
        meal_type: recipe.meal_type,
        base_servings: recipe.base_servings,
        ingredients: recipe.ingredients.clone(),
        total_calories: nutrition.total.calories.round() as i32,
        per_portion_calories: nutrition.per_portion.calories.round() as i32,
    }
}

/// GET /api/v1/catalog/recipes - All catalog recipes with nutrition
async fn list_recipes(State(_state): State<AppState>) -> Json<Vec<RecipeResponse>> {
    Json(catalog::RECIPES.iter().map(recipe_response).collect())
}

/// GET /api/v1/catalog/recipes/:slug - One recipe by slug
async fn get_recipe(
    State(_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = catalog::find_recipe(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("unknown recipe '{slug}'")))?;
    Ok(Json(recipe_response(recipe)))
}

/// GET /api/v1/catalog/recipes/:slug/portions?target= - Portion variants
/// at the fixed calorie steps; with a target, the closest variant and its
/// display-rounded ingredient list are included.
async fn recipe_portions(
    State(_state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<TargetQuery>,
) -> Result<Json<PortionVariantsResponse>, ApiError> {
    let recipe = catalog::find_recipe(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("unknown recipe '{slug}'")))?;

    let variants = portion::portion_variants(recipe, &catalog::INGREDIENTS, &DEFAULT_CALORIE_STEPS);
    let (selected, ingredients) = match query.target {
        Some(target) => {
            let selected = portion::select_variant(&variants, target).cloned();
            let scaled = selected
                .as_ref()
                .map(|v| portion::scale_to_target(recipe, &catalog::INGREDIENTS, v.calories));
            (selected, scaled.map(|s| s.ingredients))
        }
        None => (None, None),
    };

    Ok(Json(PortionVariantsResponse {
        slug,
        variants,
        selected,
        ingredients,
    }))
}

/// GET /api/v1/catalog/workouts - All workout templates
async fn list_workout_templates(State(_state): State<AppState>) -> Json<Vec<WorkoutTemplate>> {
    Json(catalog::WORKOUT_TEMPLATES.clone())
}

/// GET /api/v1/catalog/presets - All meal split presets
async fn list_presets(State(_state): State<AppState>) -> Json<Vec<MealSplitPreset>> {
    Json(catalog::MEAL_SPLIT_PRESETS.clone())
}
