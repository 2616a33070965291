//! Per-date diary entries and the pure aggregation rules over them
//!
//! Everything here is a synchronous transformation of an in-memory
//! [`DiaryEntry`] snapshot; persistence and the read-modify-write cycle
//! live in the backend. Derived totals are recomputed from the lists on
//! every read and never cached, so they cannot drift from the data.
//!
//! Merge policy: candidates are keyed by [`DedupKey::dedup_key`] and
//! inserted catalog -> external -> stored, so a later list's record for
//! the same key overwrites an earlier one (last-write-wins) while the
//! output keeps the first-occurrence order of keys. Reordering the
//! argument lists is a behavior change, not a refactor.

use crate::catalog::{ExerciseKind, WorkoutTemplate};
use crate::portion::PortionVariant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Kinds that participate in candidate merging expose a stable dedup key
pub trait DedupKey {
    /// The record's identity for merge purposes; falls back to the
    /// title/name when no explicit id was assigned.
    fn dedup_key(&self) -> &str;
}

/// Repeat rule for checklist items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepeatRule {
    #[default]
    Once,
    Daily,
    Weekly,
}

/// A logged meal with its macro snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiaryMealRecord {
    pub id: String,
    pub title: String,
    pub calories: i32,
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
    pub done: bool,
}

impl DedupKey for DiaryMealRecord {
    fn dedup_key(&self) -> &str {
        if self.id.is_empty() {
            &self.title
        } else {
            &self.id
        }
    }
}

/// A logged workout or one exercise expanded from a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiaryWorkoutRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExerciseKind>,
    pub sets: u32,
    pub reps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    /// Slug of the template this record was expanded from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_template: Option<String>,
    pub done: bool,
}

impl DedupKey for DiaryWorkoutRecord {
    fn dedup_key(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }
}

/// A recurring or one-off checklist item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    pub repeat: RepeatRule,
    pub done: bool,
}

impl DedupKey for ChecklistItem {
    fn dedup_key(&self) -> &str {
        if self.id.is_empty() {
            &self.title
        } else {
            &self.id
        }
    }
}

/// Sleep interval and subjective quality for one night
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SleepRecord {
    /// "HH:MM" wall-clock strings as entered in the survey UI
    pub start: Option<String>,
    pub end: Option<String>,
    /// Subjective 1-5 rating
    pub quality: Option<u8>,
}

/// The full set of logged activity for one calendar date.
///
/// Created lazily with zeroed defaults on first access; never deleted,
/// only overwritten. Every field is lenient to decode so a partially
/// shaped stored value recovers what it can.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiaryEntry {
    pub meals: Vec<DiaryMealRecord>,
    pub workouts: Vec<DiaryWorkoutRecord>,
    /// Liters, >= 0
    pub water_l: f64,
    pub sleep: SleepRecord,
    pub is_rest_day: bool,
    pub checklist: Vec<ChecklistItem>,
}

/// Calories and macros consumed so far, summed from `meals`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConsumedTotals {
    pub calories: i32,
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
}

impl DiaryEntry {
    /// Decode a stored JSON value, recovering whatever fields parse.
    ///
    /// A fully corrupt value yields the zeroed default; a partially
    /// shaped object keeps its well-formed fields. Never fails.
    pub fn from_json_lossy(raw: &str) -> DiaryEntry {
        if let Ok(entry) = serde_json::from_str::<DiaryEntry>(raw) {
            return entry;
        }
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(map)) => {
                let mut entry = DiaryEntry::default();
                let field = |name: &str| map.get(name).cloned();
                if let Some(v) = field("meals") {
                    entry.meals = serde_json::from_value(v).unwrap_or_default();
                }
                if let Some(v) = field("workouts") {
                    entry.workouts = serde_json::from_value(v).unwrap_or_default();
                }
                if let Some(v) = field("water_l") {
                    entry.water_l = serde_json::from_value(v).unwrap_or_default();
                }
                if let Some(v) = field("sleep") {
                    entry.sleep = serde_json::from_value(v).unwrap_or_default();
                }
                if let Some(v) = field("is_rest_day") {
                    entry.is_rest_day = serde_json::from_value(v).unwrap_or_default();
                }
                if let Some(v) = field("checklist") {
                    entry.checklist = serde_json::from_value(v).unwrap_or_default();
                }
                entry
            }
            _ => DiaryEntry::default(),
        }
    }

    /// Sum the current meal list. Computed on every read, never cached.
    pub fn consumed_totals(&self) -> ConsumedTotals {
        self.meals.iter().fold(ConsumedTotals::default(), |acc, m| {
            ConsumedTotals {
                calories: acc.calories + m.calories,
                protein_g: acc.protein_g + m.protein_g,
                fat_g: acc.fat_g + m.fat_g,
                carbs_g: acc.carbs_g + m.carbs_g,
            }
        })
    }
}

// ============================================================================
// Record ids
// ============================================================================

static ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh time-based record id.
///
/// A per-process sequence suffix keeps ids unique when a batch append
/// lands within one millisecond.
pub fn next_record_id(prefix: &str) -> String {
    let seq = ID_SEQ.fetch_add(1, Ordering::Relaxed);
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{prefix}-{millis}-{seq}")
}

// ============================================================================
// Candidate merging
// ============================================================================

/// Merge candidate lists keyed by [`DedupKey::dedup_key`].
///
/// Insertion order is catalog -> external -> stored; a later list's
/// record for an existing key replaces the earlier record in place, so
/// the output preserves the first-occurrence order of each key.
/// Idempotent: merging identical inputs twice yields the same list.
pub fn merge_candidates<T: DedupKey + Clone>(
    catalog: &[T],
    external: &[T],
    stored: &[T],
) -> Vec<T> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<T> = Vec::new();

    for item in catalog.iter().chain(external).chain(stored) {
        let key = item.dedup_key().to_string();
        match slots.get(&key) {
            Some(&idx) => merged[idx] = item.clone(),
            None => {
                slots.insert(key, merged.len());
                merged.push(item.clone());
            }
        }
    }
    merged
}

// ============================================================================
// Mutations
// ============================================================================

/// Append a meal with a freshly generated id; returns the id.
///
/// Deliberately no dedup against existing meals: logging the same food
/// twice is legitimate.
pub fn add_meal(entry: &mut DiaryEntry, mut meal: DiaryMealRecord) -> String {
    meal.id = next_record_id("meal");
    let id = meal.id.clone();
    entry.meals.push(meal);
    id
}

/// Append a workout with a freshly generated id; returns the id.
pub fn add_workout(entry: &mut DiaryEntry, mut workout: DiaryWorkoutRecord) -> String {
    workout.id = next_record_id("workout");
    let id = workout.id.clone();
    entry.workouts.push(workout);
    id
}

/// Build a meal record from a chosen portion variant snapshot
pub fn meal_from_portion(title: &str, variant: &PortionVariant) -> DiaryMealRecord {
    DiaryMealRecord {
        id: String::new(),
        title: title.to_string(),
        calories: variant.calories,
        protein_g: variant.protein_g,
        fat_g: variant.fat_g,
        carbs_g: variant.carbs_g,
        done: false,
    }
}

/// Expand every exercise of a template into workout records and append
/// them in one batch; returns the new ids.
pub fn expand_workout_template(entry: &mut DiaryEntry, template: &WorkoutTemplate) -> Vec<String> {
    template
        .exercises
        .iter()
        .map(|ex| {
            add_workout(
                entry,
                DiaryWorkoutRecord {
                    id: String::new(),
                    name: ex.name.clone(),
                    kind: Some(ex.kind),
                    sets: ex.sets,
                    reps: ex.reps,
                    weight_kg: None,
                    duration_min: ex.duration_min,
                    source_template: Some(template.slug.clone()),
                    done: false,
                },
            )
        })
        .collect()
}

/// Flip the `done` flag of the record with the given id.
///
/// Returns whether a record was found; an absent id is a no-op since a
/// second click on a stale UI state is a normal occurrence.
pub fn toggle_done(entry: &mut DiaryEntry, item_id: &str) -> bool {
    if let Some(m) = entry.meals.iter_mut().find(|m| m.id == item_id) {
        m.done = !m.done;
        return true;
    }
    if let Some(w) = entry.workouts.iter_mut().find(|w| w.id == item_id) {
        w.done = !w.done;
        return true;
    }
    if let Some(c) = entry.checklist.iter_mut().find(|c| c.id == item_id) {
        c.done = !c.done;
        return true;
    }
    false
}

/// Remove the record with the given id; absent ids are a no-op.
pub fn delete_item(entry: &mut DiaryEntry, item_id: &str) -> bool {
    let before = entry.meals.len() + entry.workouts.len() + entry.checklist.len();
    entry.meals.retain(|m| m.id != item_id);
    entry.workouts.retain(|w| w.id != item_id);
    entry.checklist.retain(|c| c.id != item_id);
    before != entry.meals.len() + entry.workouts.len() + entry.checklist.len()
}

/// Set the rest-day flag. A rest day and logged exercises are mutually
/// exclusive, so setting true clears the workout list; setting false
/// leaves it as-is.
pub fn set_rest_day(entry: &mut DiaryEntry, is_rest_day: bool) {
    if is_rest_day {
        entry.workouts.clear();
    }
    entry.is_rest_day = is_rest_day;
}

/// Replace the water total for the day
pub fn set_water(entry: &mut DiaryEntry, liters: f64) {
    entry.water_l = liters;
}

/// Replace the sleep record for the day
pub fn set_sleep(entry: &mut DiaryEntry, sleep: SleepRecord) {
    entry.sleep = sleep;
}
