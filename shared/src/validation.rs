//! Survey input validation
//!
//! Malformed biometrics (non-finite, negative, out of range, unknown enum
//! text) are rejected here with a field-level message before any metric
//! computation runs; nothing is silently coerced to a default.

use crate::metrics::{ActivityLevel, Goal, Profile, Sex};
use thiserror::Error;

/// Validation failure with field context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate age in years
pub fn validate_age(age: i64) -> Result<u32, ValidationError> {
    if age <= 0 {
        return Err(ValidationError::new("age", "must be a positive number of years"));
    }
    if age > 150 {
        return Err(ValidationError::new("age", "cannot exceed 150 years"));
    }
    Ok(age as u32)
}

/// Validate height in centimeters (50-300 cm)
pub fn validate_height_cm(height_cm: f64) -> Result<f64, ValidationError> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err(ValidationError::new("heightCm", "must be a valid number"));
    }
    if height_cm < 50.0 {
        return Err(ValidationError::new("heightCm", "must be at least 50 cm"));
    }
    if height_cm > 300.0 {
        return Err(ValidationError::new("heightCm", "must be at most 300 cm"));
    }
    Ok(height_cm)
}

/// Validate weight in kilograms (20-500 kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<f64, ValidationError> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err(ValidationError::new("weightKg", "must be a valid number"));
    }
    if weight_kg < 20.0 {
        return Err(ValidationError::new("weightKg", "must be at least 20 kg"));
    }
    if weight_kg > 500.0 {
        return Err(ValidationError::new("weightKg", "must be at most 500 kg"));
    }
    Ok(weight_kg)
}

/// Parse survey gender text
pub fn parse_sex(raw: &str) -> Result<Sex, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "male" => Ok(Sex::Male),
        "female" => Ok(Sex::Female),
        "" => Err(ValidationError::new("gender", "is required")),
        other => Err(ValidationError::new(
            "gender",
            format!("unknown value '{other}', expected male or female"),
        )),
    }
}

/// Parse survey activity text
pub fn parse_activity(raw: &str) -> Result<ActivityLevel, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "sedentary" => Ok(ActivityLevel::Sedentary),
        "light" => Ok(ActivityLevel::Light),
        "moderate" => Ok(ActivityLevel::Moderate),
        "active" => Ok(ActivityLevel::Active),
        "athlete" => Ok(ActivityLevel::Athlete),
        "" => Err(ValidationError::new("activity", "is required")),
        other => Err(ValidationError::new(
            "activity",
            format!("unknown value '{other}', expected sedentary, light, moderate, active or athlete"),
        )),
    }
}

/// Parse survey goal text
pub fn parse_goal(raw: &str) -> Result<Goal, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "lose" => Ok(Goal::Lose),
        "maintain" => Ok(Goal::Maintain),
        "gain" => Ok(Goal::Gain),
        "" => Err(ValidationError::new("goal", "is required")),
        other => Err(ValidationError::new(
            "goal",
            format!("unknown value '{other}', expected lose, maintain or gain"),
        )),
    }
}

/// Validate water volume in liters
pub fn validate_water_l(liters: f64) -> Result<f64, ValidationError> {
    if liters.is_nan() || liters.is_infinite() {
        return Err(ValidationError::new("liters", "must be a valid number"));
    }
    if liters < 0.0 {
        return Err(ValidationError::new("liters", "cannot be negative"));
    }
    if liters > 30.0 {
        return Err(ValidationError::new("liters", "unreasonably high"));
    }
    Ok(liters)
}

/// Validate a subjective sleep quality rating (1-5)
pub fn validate_sleep_quality(quality: u8) -> Result<u8, ValidationError> {
    if (1..=5).contains(&quality) {
        Ok(quality)
    } else {
        Err(ValidationError::new("quality", "must be between 1 and 5"))
    }
}

/// Build a validated [`Profile`] from raw survey fields
pub fn build_profile(
    gender: &str,
    age: i64,
    height_cm: f64,
    weight_kg: f64,
    activity: &str,
    goal: &str,
) -> Result<Profile, ValidationError> {
    Ok(Profile {
        sex: parse_sex(gender)?,
        age_years: validate_age(age)?,
        height_cm: validate_height_cm(height_cm)?,
        weight_kg: validate_weight_kg(weight_kg)?,
        activity_level: parse_activity(activity)?,
        goal: parse_goal(goal)?,
    })
}
