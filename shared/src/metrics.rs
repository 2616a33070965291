//! Profile metrics: BMR, TDEE and daily macro targets
//!
//! All calculations are pure functions over an already-validated
//! [`Profile`]. Inputs with non-finite or negative biometrics must be
//! rejected by `crate::validation` before they reach this module.
//!
//! The formula constants live in [`constants`] as the single canonical
//! set. A regression test pins their values so the tables cannot drift
//! between call sites.

use serde::{Deserialize, Serialize};

/// Biological sex for metabolic calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard daily training or a physical job
    Athlete,
}

impl ActivityLevel {
    /// Activity multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => constants::ACTIVITY_SEDENTARY,
            ActivityLevel::Light => constants::ACTIVITY_LIGHT,
            ActivityLevel::Moderate => constants::ACTIVITY_MODERATE,
            ActivityLevel::Active => constants::ACTIVITY_ACTIVE,
            ActivityLevel::Athlete => constants::ACTIVITY_ATHLETE,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::Athlete => "Very hard daily training or physical job",
        }
    }
}

/// Weight goal for calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    /// Calorie adjustment factor applied to TDEE
    pub fn calorie_factor(&self) -> f64 {
        match self {
            Goal::Lose => constants::GOAL_LOSE_FACTOR,
            Goal::Maintain => 1.0,
            Goal::Gain => constants::GOAL_GAIN_FACTOR,
        }
    }
}

/// Canonical formula constants.
///
/// The engine uses exactly one activity table and one protein coefficient.
pub mod constants {
    pub const ACTIVITY_SEDENTARY: f64 = 1.2;
    pub const ACTIVITY_LIGHT: f64 = 1.375;
    pub const ACTIVITY_MODERATE: f64 = 1.55;
    pub const ACTIVITY_ACTIVE: f64 = 1.725;
    pub const ACTIVITY_ATHLETE: f64 = 1.9;

    pub const GOAL_LOSE_FACTOR: f64 = 0.85;
    pub const GOAL_GAIN_FACTOR: f64 = 1.15;

    /// Grams of protein per kg of body weight
    pub const PROTEIN_G_PER_KG: f64 = 1.8;
    /// Grams of fat per kg of body weight
    pub const FAT_G_PER_KG: f64 = 0.9;

    /// Calories per gram of protein/carbohydrate and fat (Atwater factors)
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    pub const KCAL_PER_G_CARB: f64 = 4.0;
    pub const KCAL_PER_G_FAT: f64 = 9.0;
}

/// Validated biometric profile used for target computation
///
/// Immutable per computation; re-submitting the survey produces a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub sex: Sex,
    /// Age in whole years, > 0
    pub age_years: u32,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// Daily calorie and macro targets derived from a profile
///
/// Never persisted independently of the profile: always recomputable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub calories: i32,
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
}

/// Basal Metabolic Rate via Mifflin-St Jeor
///
/// Men: 10w + 6.25h - 5a + 5; Women: 10w + 6.25h - 5a - 161
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Total Daily Energy Expenditure: BMR scaled by activity
pub fn total_daily_energy(profile: &Profile) -> f64 {
    basal_metabolic_rate(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.sex,
    ) * profile.activity_level.multiplier()
}

/// Compute daily calorie and macro targets for a validated profile.
///
/// Calories are the goal-adjusted TDEE. Protein and fat come from body
/// weight; carbs fill the remaining calorie budget and are clamped at zero
/// when protein and fat alone exceed it.
pub fn compute_targets(profile: &Profile) -> NutritionTargets {
    let calories = total_daily_energy(profile) * profile.goal.calorie_factor();
    let protein_g = (profile.weight_kg * constants::PROTEIN_G_PER_KG).round();
    let fat_g = (profile.weight_kg * constants::FAT_G_PER_KG).round();

    let remaining = calories
        - protein_g * constants::KCAL_PER_G_PROTEIN
        - fat_g * constants::KCAL_PER_G_FAT;
    let carbs_g = (remaining / constants::KCAL_PER_G_CARB).round().max(0.0);

    NutritionTargets {
        calories: calories.round() as i32,
        protein_g: protein_g as i32,
        fat_g: fat_g as i32,
        carbs_g: carbs_g as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(weight_kg: f64, activity: ActivityLevel, goal: Goal) -> Profile {
        Profile {
            sex: Sex::Male,
            age_years: 30,
            height_cm: 176.0,
            weight_kg,
            activity_level: activity,
            goal,
        }
    }

    #[test]
    fn test_bmr_reference_scenario() {
        // 30yo male, 80kg, 176cm: 800 + 1100 - 150 + 5
        let bmr = basal_metabolic_rate(80.0, 176.0, 30, Sex::Male);
        assert_eq!(bmr, 1755.0);
    }

    #[test]
    fn test_tdee_uses_moderate_multiplier() {
        let p = profile(80.0, ActivityLevel::Moderate, Goal::Maintain);
        let tdee = total_daily_energy(&p);
        assert!((tdee - 1755.0 * 1.55).abs() < 1e-9);
    }

    #[test]
    fn test_female_offset() {
        let male = basal_metabolic_rate(60.0, 165.0, 25, Sex::Male);
        let female = basal_metabolic_rate(60.0, 165.0, 25, Sex::Female);
        assert_eq!(male - female, 166.0);
    }

    #[test]
    fn test_maintain_targets() {
        let p = profile(80.0, ActivityLevel::Moderate, Goal::Maintain);
        let t = compute_targets(&p);
        assert_eq!(t.calories, 2720); // 1755 * 1.55 = 2720.25
        assert_eq!(t.protein_g, 144); // 80 * 1.8
        assert_eq!(t.fat_g, 72); // 80 * 0.9
        // carbs fill the remainder: (2720.25 - 576 - 648) / 4
        assert_eq!(t.carbs_g, 374);
    }

    #[test]
    fn test_lose_goal_reduces_calories() {
        let maintain = compute_targets(&profile(80.0, ActivityLevel::Moderate, Goal::Maintain));
        let lose = compute_targets(&profile(80.0, ActivityLevel::Moderate, Goal::Lose));
        let gain = compute_targets(&profile(80.0, ActivityLevel::Moderate, Goal::Gain));
        assert!(lose.calories < maintain.calories);
        assert!(gain.calories > maintain.calories);
        // protein and fat depend only on weight, not goal
        assert_eq!(lose.protein_g, maintain.protein_g);
        assert_eq!(gain.fat_g, maintain.fat_g);
    }

    /// Pins the canonical constant set; fails loudly if anyone edits the
    /// values or introduces a second table.
    #[test]
    fn test_formula_constants_pinned() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::Light.multiplier(), 1.375);
        assert_eq!(ActivityLevel::Moderate.multiplier(), 1.55);
        assert_eq!(ActivityLevel::Active.multiplier(), 1.725);
        assert_eq!(ActivityLevel::Athlete.multiplier(), 1.9);
        assert_eq!(constants::PROTEIN_G_PER_KG, 1.8);
        assert_eq!(constants::FAT_G_PER_KG, 0.9);
        assert_eq!(Goal::Lose.calorie_factor(), 0.85);
        assert_eq!(Goal::Maintain.calorie_factor(), 1.0);
        assert_eq!(Goal::Gain.calorie_factor(), 1.15);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: protein and fat targets are monotonic in weight
        /// for a fixed activity level and goal
        #[test]
        fn prop_targets_monotonic_in_weight(
            w1 in 40.0f64..100.0,
            delta in 5.0f64..60.0
        ) {
            let lighter = compute_targets(&profile(w1, ActivityLevel::Moderate, Goal::Maintain));
            let heavier = compute_targets(&profile(w1 + delta, ActivityLevel::Moderate, Goal::Maintain));
            prop_assert!(heavier.protein_g > lighter.protein_g);
            prop_assert!(heavier.fat_g > lighter.fat_g);
        }

        /// Property: carbs never go negative, even when protein and fat
        /// calories exceed the adjusted TDEE
        #[test]
        fn prop_carbs_never_negative(
            weight in 40.0f64..250.0,
            height in 140.0f64..210.0,
            age in 18u32..90
        ) {
            let p = Profile {
                sex: Sex::Female,
                age_years: age,
                height_cm: height,
                weight_kg: weight,
                activity_level: ActivityLevel::Sedentary,
                goal: Goal::Lose,
            };
            let t = compute_targets(&p);
            prop_assert!(t.carbs_g >= 0);
        }

        /// Property: more active always means more calories
        #[test]
        fn prop_activity_increases_calories(
            weight in 45.0f64..120.0,
        ) {
            let sedentary = compute_targets(&profile(weight, ActivityLevel::Sedentary, Goal::Maintain));
            let athlete = compute_targets(&profile(weight, ActivityLevel::Athlete, Goal::Maintain));
            prop_assert!(athlete.calories > sedentary.calories);
        }

        /// Property: male BMR exceeds female BMR for identical biometrics
        #[test]
        fn prop_male_bmr_higher(
            weight in 45.0f64..120.0,
            height in 150.0f64..200.0,
            age in 18u32..80
        ) {
            let male = basal_metabolic_rate(weight, height, age, Sex::Male);
            let female = basal_metabolic_rate(weight, height, age, Sex::Female);
            prop_assert!(male > female);
        }
    }
}
