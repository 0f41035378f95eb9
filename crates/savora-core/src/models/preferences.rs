// ABOUTME: Meal plan preference aggregate owned by a client's settings record
// ABOUTME: NutrientRange, MealSection, PlanSection, and MealPlanPreferences with bundled defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::filter::{LabelCategory, MealFilter};
use crate::constants::{defaults, nutrients, sections};

/// Inclusive bound pair for one nutrient; an absent bound is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientRange {
    /// Lower bound, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NutrientRange {
    /// Range bounded on both sides
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Range bounded above only
    #[must_use]
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Range bounded below only
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }
}

/// Nutrient-range constraints keyed by nutrient code (e.g. `ENERC_KCAL`)
pub type NutrientConstraints = BTreeMap<String, NutrientRange>;

/// Constraints for a single meal slot (e.g. Breakfast)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealSection {
    /// Filter tree a recipe must satisfy to be assigned to this slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<MealFilter>,
    /// Per-slot nutrient ranges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<NutrientConstraints>,
    /// Recipe URIs excluded from this slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

/// Plan-wide constraints plus per-slot overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSection {
    /// Filter tree every recipe in the plan must satisfy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<MealFilter>,
    /// Plan-wide daily nutrient ranges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<NutrientConstraints>,
    /// Recipe URIs excluded from the whole plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    /// Per-slot overrides keyed by section name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<String, MealSection>,
}

/// A client's meal plan preferences, owned by their settings record
///
/// Created and updated only through explicit store/update calls against the
/// backend; nothing creates one implicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanPreferences {
    /// Backend-assigned identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identifier of the owning client settings record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_settings_id: Option<String>,
    /// Requested plan length in days
    pub size: u32,
    /// The filter/constraint tree sent to the solver
    pub plan: PlanSection,
}

impl MealPlanPreferences {
    /// The bundled recommended defaults applied by the "apply defaults"
    /// operation
    ///
    /// Returned by value so callers can never mutate shared state; the
    /// defaulting flow copies from this and derives its views in one step.
    #[must_use]
    pub fn recommended() -> Self {
        let mut plan_sections = BTreeMap::new();
        plan_sections.insert(
            sections::BREAKFAST.to_owned(),
            MealSection {
                accept: Some(MealFilter::all_of(vec![
                    MealFilter::labels(LabelCategory::Meal, ["breakfast"]),
                    MealFilter::labels(
                        LabelCategory::Dish,
                        ["egg", "cereals", "bread", "pancake", "drinks"],
                    ),
                ])),
                fit: Some(energy_range(100.0, 600.0)),
                exclude: None,
            },
        );
        plan_sections.insert(
            sections::LUNCH.to_owned(),
            MealSection {
                accept: Some(MealFilter::all_of(vec![
                    MealFilter::labels(LabelCategory::Meal, ["lunch/dinner"]),
                    MealFilter::labels(
                        LabelCategory::Dish,
                        ["main course", "pasta", "salad", "soup", "sandwiches"],
                    ),
                ])),
                fit: Some(energy_range(300.0, 900.0)),
                exclude: None,
            },
        );
        plan_sections.insert(
            sections::DINNER.to_owned(),
            MealSection {
                accept: Some(MealFilter::all_of(vec![
                    MealFilter::labels(LabelCategory::Meal, ["lunch/dinner"]),
                    MealFilter::labels(
                        LabelCategory::Dish,
                        ["seafood", "egg", "salad", "pizza", "pasta", "main course"],
                    ),
                ])),
                fit: Some(energy_range(200.0, 900.0)),
                exclude: None,
            },
        );

        let mut fit = NutrientConstraints::new();
        fit.insert(
            nutrients::ENERC_KCAL.to_owned(),
            NutrientRange::between(1000.0, 2000.0),
        );
        fit.insert(nutrients::SUGAR.to_owned(), NutrientRange::at_most(80.0));

        Self {
            id: None,
            client_settings_id: None,
            size: defaults::PLAN_SIZE_DAYS,
            plan: PlanSection {
                accept: Some(MealFilter::all_of(vec![
                    MealFilter::labels(LabelCategory::Health, ["sugar-conscious"]),
                    MealFilter::labels(LabelCategory::Diet, ["balanced"]),
                    MealFilter::labels(LabelCategory::Caution, ["gluten"]),
                ])),
                fit: Some(fit),
                exclude: None,
                sections: plan_sections,
            },
        }
    }
}

fn energy_range(min: f64, max: f64) -> NutrientConstraints {
    let mut fit = NutrientConstraints::new();
    fit.insert(
        nutrients::ENERC_KCAL.to_owned(),
        NutrientRange::between(min, max),
    );
    fit
}
