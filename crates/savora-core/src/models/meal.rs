// ABOUTME: Meal entity derived from a recipe scaled to a single serving
// ABOUTME: Meal, MealType, MealSlot correlation key, and weekday naming
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::recipe::NutrientMap;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Unspecified or other meal type
    Other,
}

impl MealType {
    /// Parse meal type from a section name or free-form string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Other,
        }
    }
}

/// Correlation key tying a meal to the recipe filling the same plan slot
///
/// Stamped on both records by the reconciler so later joins (e.g. assigning
/// `recipe_id` after persistence) never have to re-derive a match from
/// wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    /// Zero-based day index within the plan
    pub day_index: u32,
    /// Section name (e.g. "Breakfast")
    pub section: String,
}

impl MealSlot {
    /// Construct a slot key
    #[must_use]
    pub fn new(day_index: u32, section: impl Into<String>) -> Self {
        Self {
            day_index,
            section: section.into(),
        }
    }
}

/// Full English weekday name for a chrono [`Weekday`]
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A single-serving meal derived from a recipe by the reconciler
///
/// `recipe_id` is populated only after the owning recipe has been persisted
/// (and therefore has an id), joined via the shared [`MealSlot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Backend-assigned identifier; absent until first persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning meal plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan_id: Option<String>,
    /// The persisted recipe this meal was derived from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    /// Owning client identifier
    pub client_id: String,
    /// Meal name, taken from the recipe label
    pub name: String,
    /// Ingredient text lines carried over from the recipe
    #[serde(default)]
    pub ingredient_lines: Vec<String>,
    /// Single-serving weight in grams
    pub weight: f64,
    /// Single-serving nutrient values
    #[serde(default)]
    pub nutrients: NutrientMap,
    /// When the meal is scheduled
    pub time_scheduled: DateTime<Utc>,
    /// When the meal was actually consumed, if logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_consumed: Option<DateTime<Utc>>,
    /// Owning section name (e.g. "Breakfast")
    pub meal_type_key: String,
    /// Coarse meal type parsed from the section name
    pub meal_type: MealType,
    /// Whether the meal has been logged as eaten
    pub is_logged: bool,
    /// Full weekday name of the scheduled date (e.g. "Monday")
    pub day_of_the_week: String,
    /// Plan slot this meal fills; stamped by the reconciler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<MealSlot>,
}
