//! Meal split allocation: distributing a daily target across meal slots
//!
//! A preset maps meal slots to fractions of the daily target. Fractions
//! need not sum to 1: the unallocated remainder is dropped on purpose
//! (a preset that plans 90% of the day leaves 10% unplanned), never
//! redistributed across the other slots.

use crate::metrics::NutritionTargets;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named meal category used for calorie distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

impl MealSlot {
    /// All slots in display order
    pub const ALL: [MealSlot; 5] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
        MealSlot::Dessert,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
            MealSlot::Dessert => "Dessert",
        }
    }
}

/// A meal split preset: fraction of the daily target per slot
///
/// Invariant: every ratio is >= 0. Ratios are not required to sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSplitPreset {
    pub id: String,
    pub label: String,
    pub ratios: HashMap<MealSlot, f64>,
}

impl MealSplitPreset {
    /// Ratio for a slot; absent slots get 0
    pub fn ratio(&self, slot: MealSlot) -> f64 {
        self.ratios.get(&slot).copied().unwrap_or(0.0)
    }
}

/// Per-slot sub-targets derived from the daily targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTargets {
    pub slot: MealSlot,
    pub calories: i32,
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
    /// False when the preset assigns no share to this slot; callers must
    /// omit inapplicable slots from summaries rather than render zeros.
    pub applicable: bool,
}

impl SlotTargets {
    pub fn is_applicable(&self) -> bool {
        self.applicable
    }
}

/// Allocate one slot's share of the daily targets.
///
/// Stateless: presets may be reselected at any time and switching presets
/// never touches historical diary data.
pub fn allocate(daily: &NutritionTargets, preset: &MealSplitPreset, slot: MealSlot) -> SlotTargets {
    let ratio = preset.ratio(slot);
    if ratio <= 0.0 {
        return SlotTargets {
            slot,
            calories: 0,
            protein_g: 0,
            fat_g: 0,
            carbs_g: 0,
            applicable: false,
        };
    }

    let scale = |v: i32| (f64::from(v) * ratio).round() as i32;
    SlotTargets {
        slot,
        calories: scale(daily.calories),
        protein_g: scale(daily.protein_g),
        fat_g: scale(daily.fat_g),
        carbs_g: scale(daily.carbs_g),
        applicable: true,
    }
}

/// Allocate every applicable slot of a preset, in display order
pub fn allocate_all(daily: &NutritionTargets, preset: &MealSplitPreset) -> Vec<SlotTargets> {
    MealSlot::ALL
        .iter()
        .map(|&slot| allocate(daily, preset, slot))
        .filter(SlotTargets::is_applicable)
        .collect()
}
