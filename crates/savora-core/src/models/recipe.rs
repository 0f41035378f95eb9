// ABOUTME: Recipe entity with absolute and base (unscaled) nutrient values
// ABOUTME: Nutrient, NutrientMap, Ingredient, and the Recipe scaling invariant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::meal::MealSlot;

/// One nutrient value as reported by the recipe API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    /// Display label (e.g. "Energy")
    pub label: String,
    /// Amount in `unit`
    pub quantity: f64,
    /// Unit string (e.g. "kcal", "g")
    pub unit: String,
}

impl Nutrient {
    /// Construct a nutrient value
    #[must_use]
    pub fn new(label: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Nutrient values keyed by nutrient code (e.g. `ENERC_KCAL`)
pub type NutrientMap = BTreeMap<String, Nutrient>;

/// A structured ingredient within a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Original ingredient text line
    pub text: String,
    /// Parsed quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Parsed measure (e.g. "cup")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    /// Canonical food name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<String>,
    /// Weight contribution in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Food database identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
}

/// A full recipe record fetched from the external recipe API
///
/// `total_nutrients` / `total_daily` / `total_weight` are absolute values for
/// the recipe's current `yield`; the `base_*` fields hold the unscaled
/// original values. The two must stay consistent under
/// `total_nutrients[k].quantity == base_total_nutrients[k].quantity *
/// (yield / base_yield)` wherever scaling is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Backend-assigned identifier; absent until first persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning meal plan, once assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan_id: Option<String>,
    /// Owning client identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Canonical recipe URI at the external API
    pub uri: String,
    /// Recipe title
    pub label: String,
    /// Original ingredient text lines
    #[serde(default)]
    pub ingredient_lines: Vec<String>,
    /// Structured ingredients
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Number of servings the recipe currently yields
    #[serde(rename = "yield")]
    pub recipe_yield: f64,
    /// Number of servings the fetched recipe originally yielded
    pub base_yield: f64,
    /// Absolute calories for the current yield
    pub calories: f64,
    /// Absolute total weight in grams for the current yield
    pub total_weight: f64,
    /// Absolute nutrient values for the current yield
    #[serde(default)]
    pub total_nutrients: NutrientMap,
    /// Absolute daily-value percentages for the current yield
    #[serde(default)]
    pub total_daily: NutrientMap,
    /// Unscaled nutrient values as originally fetched
    #[serde(default)]
    pub base_total_nutrients: NutrientMap,
    /// Unscaled daily-value percentages as originally fetched
    #[serde(default)]
    pub base_total_daily: NutrientMap,
    /// Unscaled total weight as originally fetched
    pub base_total_weight: f64,
    /// Meal type labels from the recipe API (e.g. "breakfast")
    #[serde(default)]
    pub meal_type: Vec<String>,
    /// When the recipe is scheduled within its plan; stamped by the
    /// reconciler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_scheduled: Option<DateTime<Utc>>,
    /// Plan slot this recipe was assigned to; stamped by the reconciler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<MealSlot>,
}
