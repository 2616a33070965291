//! Static catalogs: ingredient ledger, recipes, workout templates and
//! meal split presets
//!
//! Catalog data is read-only for the process lifetime and consumed via
//! slug/id lookup. Authoring lives outside the engine.

use crate::meal_split::{MealSlot, MealSplitPreset};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Calorie and macro figures for some quantity of food
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

impl Macros {
    pub const ZERO: Macros = Macros {
        calories: 0.0,
        protein_g: 0.0,
        fat_g: 0.0,
        carbs_g: 0.0,
    };

    pub fn scaled(&self, factor: f64) -> Macros {
        Macros {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            fat_g: self.fat_g * factor,
            carbs_g: self.carbs_g * factor,
        }
    }

    pub fn add(&self, other: &Macros) -> Macros {
        Macros {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            fat_g: self.fat_g + other.fat_g,
            carbs_g: self.carbs_g + other.carbs_g,
        }
    }
}

/// Default measurement family of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientUnit {
    Mass,
    Volume,
    Count,
}

/// How an ingredient's macro coefficients are expressed.
///
/// An ingredient is either dosed per 100 units (grams/milliliters) or per
/// piece; the enum makes "both nonzero at once" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroBasis {
    PerHundred(Macros),
    PerPiece(Macros),
}

/// Ledger row: macro coefficients for one ingredient id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientBase {
    pub id: String,
    pub unit: IngredientUnit,
    pub basis: MacroBasis,
}

impl IngredientBase {
    /// Macros contributed by `amount` of this ingredient
    pub fn macros_for(&self, amount: f64) -> Macros {
        match self.basis {
            MacroBasis::PerHundred(m) => m.scaled(amount / 100.0),
            MacroBasis::PerPiece(m) => m.scaled(amount),
        }
    }
}

/// Static per-ingredient macro lookup
#[derive(Debug, Clone, Default)]
pub struct IngredientLedger {
    entries: HashMap<String, IngredientBase>,
}

impl IngredientLedger {
    pub fn new(rows: Vec<IngredientBase>) -> Self {
        Self {
            entries: rows.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&IngredientBase> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One line of a recipe's ingredient list
///
/// `unit` is free-form catalog text ("g", "ml", "pcs", "tbsp"); the portion
/// scaler classifies it for display rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: String,
    pub amount: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Immutable catalog recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDefinition {
    pub slug: String,
    pub title: String,
    pub meal_type: MealSlot,
    /// Number of portions the base ingredient list yields, >= 1
    pub base_servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Exercise kind inside a workout template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Strength,
    Cardio,
    Mobility,
}

/// One exercise of a workout template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSpec {
    pub name: String,
    pub kind: ExerciseKind,
    pub sets: u32,
    pub reps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
}

/// Immutable catalog workout template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub slug: String,
    pub title: String,
    pub exercises: Vec<ExerciseSpec>,
}

// ============================================================================
// Default catalog data
// ============================================================================

fn row(id: &str, unit: IngredientUnit, basis: MacroBasis) -> IngredientBase {
    IngredientBase {
        id: id.to_string(),
        unit,
        basis,
    }
}

fn per100(calories: f64, protein_g: f64, fat_g: f64, carbs_g: f64) -> MacroBasis {
    MacroBasis::PerHundred(Macros {
        calories,
        protein_g,
        fat_g,
        carbs_g,
    })
}

fn per_piece(calories: f64, protein_g: f64, fat_g: f64, carbs_g: f64) -> MacroBasis {
    MacroBasis::PerPiece(Macros {
        calories,
        protein_g,
        fat_g,
        carbs_g,
    })
}

/// Built-in ingredient ledger
pub static INGREDIENTS: Lazy<IngredientLedger> = Lazy::new(|| {
    IngredientLedger::new(vec![
        row("oats", IngredientUnit::Mass, per100(370.0, 13.0, 7.0, 62.0)),
        row("milk", IngredientUnit::Volume, per100(47.0, 3.3, 1.5, 4.8)),
        row("egg", IngredientUnit::Count, per_piece(72.0, 6.3, 4.8, 0.4)),
        row("banana", IngredientUnit::Count, per_piece(105.0, 1.3, 0.4, 27.0)),
        row(
            "chicken-breast",
            IngredientUnit::Mass,
            per100(165.0, 31.0, 3.6, 0.0),
        ),
        row("rice", IngredientUnit::Mass, per100(360.0, 7.0, 0.7, 79.0)),
        row(
            "olive-oil",
            IngredientUnit::Volume,
            per100(884.0, 0.0, 100.0, 0.0),
        ),
        row(
            "greek-yogurt",
            IngredientUnit::Mass,
            per100(59.0, 10.0, 0.4, 3.6),
        ),
        row("honey", IngredientUnit::Mass, per100(304.0, 0.3, 0.0, 82.0)),
        row(
            "cottage-cheese",
            IngredientUnit::Mass,
            per100(98.0, 11.0, 4.3, 3.4),
        ),
        row("salmon", IngredientUnit::Mass, per100(208.0, 20.0, 13.0, 0.0)),
        row(
            "buckwheat",
            IngredientUnit::Mass,
            per100(343.0, 13.0, 3.4, 72.0),
        ),
        row("tomato", IngredientUnit::Count, per_piece(22.0, 1.1, 0.2, 4.8)),
        row("salt", IngredientUnit::Mass, per100(0.0, 0.0, 0.0, 0.0)),
    ])
});

/// Built-in recipe catalog
pub static RECIPES: Lazy<Vec<RecipeDefinition>> = Lazy::new(|| {
    fn ing(id: &str, amount: f64, unit: &str) -> RecipeIngredient {
        RecipeIngredient {
            ingredient_id: id.to_string(),
            amount,
            unit: unit.to_string(),
            note: None,
        }
    }

    vec![
        RecipeDefinition {
            slug: "banana-oatmeal".to_string(),
            title: "Banana oatmeal".to_string(),
            meal_type: MealSlot::Breakfast,
            base_servings: 1,
            ingredients: vec![
                ing("oats", 60.0, "g"),
                ing("milk", 200.0, "ml"),
                ing("banana", 1.0, "pcs"),
                ing("honey", 10.0, "g"),
            ],
        },
        RecipeDefinition {
            slug: "chicken-rice-bowl".to_string(),
            title: "Chicken and rice bowl".to_string(),
            meal_type: MealSlot::Lunch,
            base_servings: 2,
            ingredients: vec![
                ing("chicken-breast", 300.0, "g"),
                ing("rice", 150.0, "g"),
                ing("olive-oil", 15.0, "ml"),
                ing("tomato", 2.0, "pcs"),
                ing("salt", 3.0, "g"),
            ],
        },
        RecipeDefinition {
            slug: "salmon-buckwheat".to_string(),
            title: "Salmon with buckwheat".to_string(),
            meal_type: MealSlot::Dinner,
            base_servings: 1,
            ingredients: vec![
                ing("salmon", 180.0, "g"),
                ing("buckwheat", 80.0, "g"),
                ing("olive-oil", 10.0, "ml"),
            ],
        },
        RecipeDefinition {
            slug: "protein-yogurt-cup".to_string(),
            title: "Protein yogurt cup".to_string(),
            meal_type: MealSlot::Snack,
            base_servings: 1,
            ingredients: vec![
                ing("greek-yogurt", 200.0, "g"),
                ing("cottage-cheese", 100.0, "g"),
                ing("honey", 15.0, "g"),
                ing("banana", 1.0, "pcs"),
            ],
        },
    ]
});

/// Built-in workout templates
pub static WORKOUT_TEMPLATES: Lazy<Vec<WorkoutTemplate>> = Lazy::new(|| {
    fn ex(name: &str, kind: ExerciseKind, sets: u32, reps: u32) -> ExerciseSpec {
        ExerciseSpec {
            name: name.to_string(),
            kind,
            sets,
            reps,
            duration_min: None,
        }
    }

    vec![
        WorkoutTemplate {
            slug: "full-body-a".to_string(),
            title: "Full body A".to_string(),
            exercises: vec![
                ex("Squat", ExerciseKind::Strength, 4, 8),
                ex("Bench press", ExerciseKind::Strength, 4, 8),
                ex("Bent-over row", ExerciseKind::Strength, 3, 10),
                ex("Plank", ExerciseKind::Mobility, 3, 1),
            ],
        },
        WorkoutTemplate {
            slug: "easy-cardio".to_string(),
            title: "Easy cardio".to_string(),
            exercises: vec![
                ExerciseSpec {
                    name: "Incline walk".to_string(),
                    kind: ExerciseKind::Cardio,
                    sets: 1,
                    reps: 1,
                    duration_min: Some(30),
                },
                ex("Jump rope", ExerciseKind::Cardio, 5, 60),
            ],
        },
    ]
});

/// Built-in meal split presets
pub static MEAL_SPLIT_PRESETS: Lazy<Vec<MealSplitPreset>> = Lazy::new(|| {
    fn preset(id: &str, label: &str, ratios: &[(MealSlot, f64)]) -> MealSplitPreset {
        MealSplitPreset {
            id: id.to_string(),
            label: label.to_string(),
            ratios: ratios.iter().copied().collect(),
        }
    }

    vec![
        preset(
            "three-meals",
            "Three square meals",
            &[
                (MealSlot::Breakfast, 0.3),
                (MealSlot::Lunch, 0.4),
                (MealSlot::Dinner, 0.3),
            ],
        ),
        preset(
            "five-meals",
            "Five small meals",
            &[
                (MealSlot::Breakfast, 0.25),
                (MealSlot::Lunch, 0.3),
                (MealSlot::Dinner, 0.25),
                (MealSlot::Snack, 0.1),
                (MealSlot::Dessert, 0.1),
            ],
        ),
        // Deliberately sums to 0.9: the free 10% stays unplanned.
        preset(
            "light-dinner",
            "Light dinner",
            &[
                (MealSlot::Breakfast, 0.35),
                (MealSlot::Lunch, 0.4),
                (MealSlot::Dinner, 0.15),
            ],
        ),
    ]
});

/// Look up a catalog recipe by slug
pub fn find_recipe(slug: &str) -> Option<&'static RecipeDefinition> {
    RECIPES.iter().find(|r| r.slug == slug)
}

/// Look up a workout template by slug
pub fn find_workout_template(slug: &str) -> Option<&'static WorkoutTemplate> {
    WORKOUT_TEMPLATES.iter().find(|t| t.slug == slug)
}

/// Look up a meal split preset by id
pub fn find_preset(id: &str) -> Option<&'static MealSplitPreset> {
    MEAL_SPLIT_PRESETS.iter().find(|p| p.id == id)
}
