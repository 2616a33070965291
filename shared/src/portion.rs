//! Portion scaling: recipe nutrition and calorie-target scaling with
//! kitchen-friendly ingredient rounding
//!
//! Reported macros always come from the unrounded scale factor applied to
//! the ledger. Display amounts are rounded per ingredient so a scaled
//! recipe never asks for "3.7 g of salt"; the few-percent drift between
//! the rounded amounts and the reported macros is accepted.

use crate::catalog::{IngredientLedger, Macros, RecipeDefinition};
use serde::{Deserialize, Serialize};

/// Fixed calorie steps used for catalog portion variants
pub const DEFAULT_CALORIE_STEPS: [i32; 6] = [300, 400, 500, 600, 700, 800];

/// Display-rounding family of a recipe ingredient's unit text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    /// Discrete pieces: rounded to whole items, never dropped to zero
    Count,
    /// Grams or milliliters: rounded to multiples of 5 or 10
    MassVolume,
    /// Anything else: tiered fractional rounding
    Freeform,
}

impl UnitClass {
    /// Classify free-form catalog unit text
    pub fn classify(unit: &str) -> UnitClass {
        match unit.trim().to_lowercase().as_str() {
            "pcs" | "pc" | "piece" | "pieces" => UnitClass::Count,
            "g" | "gram" | "grams" | "ml" | "milliliter" | "milliliters" => UnitClass::MassVolume,
            _ => UnitClass::Freeform,
        }
    }
}

/// Round a scaled amount for display according to its unit class.
///
/// Count: nearest whole piece, clamped to 1 while any amount remains.
/// Mass/volume: nearest 5 up to 20 (clamped to 5), nearest 10 above.
/// Freeform: >= 50 whole numbers, 10..50 halves, < 10 tenths.
pub fn round_display(raw: f64, class: UnitClass) -> f64 {
    match class {
        UnitClass::Count => {
            let rounded = raw.round();
            if rounded == 0.0 && raw > 0.0 {
                1.0
            } else {
                rounded
            }
        }
        UnitClass::MassVolume => {
            if raw <= 20.0 {
                let rounded = (raw / 5.0).round() * 5.0;
                if rounded == 0.0 && raw > 0.0 {
                    5.0
                } else {
                    rounded
                }
            } else {
                (raw / 10.0).round() * 10.0
            }
        }
        UnitClass::Freeform => {
            if raw >= 50.0 {
                raw.round()
            } else if raw >= 10.0 {
                (raw * 2.0).round() / 2.0
            } else {
                (raw * 10.0).round() / 10.0
            }
        }
    }
}

/// Total and per-portion nutrition of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealNutrition {
    pub total: Macros,
    pub per_portion: Macros,
    pub base_servings: u32,
}

/// A recipe's nutrition figures at a specific target calorie value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortionVariant {
    /// Keyed by the target calorie value, e.g. `banana-oatmeal-600`
    pub id: String,
    pub calories: i32,
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
}

/// One display-rounded ingredient line of a scaled recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    pub ingredient_id: String,
    pub amount: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A recipe scaled to a calorie target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledPortion {
    pub variant: PortionVariant,
    pub ingredients: Vec<ScaledIngredient>,
    /// The unrounded scale factor applied to the ledger
    pub factor: f64,
}

/// Compute a recipe's total and per-portion nutrition from the ledger.
///
/// Unknown ingredient ids contribute zero macros and are skipped; one bad
/// catalog row must not break scaling for the rest of the recipe.
pub fn recipe_nutrition(recipe: &RecipeDefinition, ledger: &IngredientLedger) -> MealNutrition {
    let total = recipe
        .ingredients
        .iter()
        .filter_map(|ing| {
            ledger
                .lookup(&ing.ingredient_id)
                .map(|base| base.macros_for(ing.amount))
        })
        .fold(Macros::ZERO, |acc, m| acc.add(&m));

    let servings = recipe.base_servings.max(1);
    MealNutrition {
        total,
        per_portion: total.scaled(1.0 / f64::from(servings)),
        base_servings: servings,
    }
}

fn variant_from(recipe: &RecipeDefinition, macros: &Macros, target_calories: i32) -> PortionVariant {
    PortionVariant {
        id: format!("{}-{}", recipe.slug, target_calories),
        calories: macros.calories.round() as i32,
        protein_g: macros.protein_g.round() as i32,
        fat_g: macros.fat_g.round() as i32,
        carbs_g: macros.carbs_g.round() as i32,
    }
}

/// Scale a recipe to a calorie target.
///
/// `factor = target / base_calories`; the variant's macros use the exact
/// factor while ingredient amounts are display-rounded per unit class.
pub fn scale_to_target(
    recipe: &RecipeDefinition,
    ledger: &IngredientLedger,
    target_calories: i32,
) -> ScaledPortion {
    let nutrition = recipe_nutrition(recipe, ledger);
    let base_calories = nutrition.total.calories;
    let factor = if base_calories > 0.0 {
        f64::from(target_calories) / base_calories
    } else {
        1.0
    };

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|ing| {
            let raw = ing.amount * factor;
            ScaledIngredient {
                ingredient_id: ing.ingredient_id.clone(),
                amount: round_display(raw, UnitClass::classify(&ing.unit)),
                unit: ing.unit.clone(),
                note: ing.note.clone(),
            }
        })
        .collect();

    ScaledPortion {
        variant: variant_from(recipe, &nutrition.total.scaled(factor), target_calories),
        ingredients,
        factor,
    }
}

/// Variants of a recipe at fixed calorie steps
pub fn portion_variants(
    recipe: &RecipeDefinition,
    ledger: &IngredientLedger,
    steps: &[i32],
) -> Vec<PortionVariant> {
    steps
        .iter()
        .map(|&target| scale_to_target(recipe, ledger, target).variant)
        .collect()
}

/// Pick the variant closest to a calorie target.
///
/// Exact ties go to the first-encountered (lowest-step) variant.
pub fn select_variant<'a>(
    variants: &'a [PortionVariant],
    target_calories: i32,
) -> Option<&'a PortionVariant> {
    variants.iter().fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(current) => {
            if (candidate.calories - target_calories).abs()
                < (current.calories - target_calories).abs()
            {
                Some(candidate)
            } else {
                Some(current)
            }
        }
    })
}
