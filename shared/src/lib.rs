//! Fitdiary Shared Library
//!
//! Domain logic of the nutrition planning and diary aggregation engine:
//! profile metrics, meal split allocation, portion scaling, diary
//! aggregation, static catalogs and input validation. Pure and
//! I/O-free; persistence and HTTP live in the backend crate.

pub mod catalog;
pub mod diary;
pub mod meal_split;
pub mod metrics;
pub mod portion;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use meal_split::{allocate, allocate_all, MealSlot, MealSplitPreset, SlotTargets};
pub use metrics::{compute_targets, ActivityLevel, Goal, NutritionTargets, Profile, Sex};
pub use portion::{recipe_nutrition, scale_to_target, select_variant, PortionVariant};
