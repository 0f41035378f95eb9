// ABOUTME: Flattened preference views derived from the canonical plan object
// ABOUTME: Apply-defaults and reset-to-settings operations with lockstep derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Preference views
//!
//! The settings UI does not edit the filter tree directly; it works with a
//! flattened label selection plus three derived views: the selected section
//! keys, the selected nutrient keys, and the nutrient ranges. All four are
//! projections of the canonical [`MealPlanPreferences`] and are derived
//! together in a single call - deriving them separately is how they drift.
//!
//! Two symmetric operations feed the view: "apply defaults" copies the
//! bundled recommended preferences, "reset to client settings" copies the
//! client's persisted preferences. Both flatten identically.

use std::collections::BTreeMap;
use std::collections::HashSet;

use savora_core::errors::{AppError, AppResult};
use savora_core::models::{
    ClientSettings, LabelCategory, MealPlanPreferences, NutrientRange,
};

/// Flattened projections of a preferences aggregate, always derived together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesView {
    /// Flat, deduplicated label selection from the plan-wide accept tree,
    /// in first-seen order
    pub selected_labels: Vec<String>,
    /// Section keys carrying per-slot overrides
    pub selected_sections: Vec<String>,
    /// Nutrient codes constrained at the plan level
    pub selected_nutrients: Vec<String>,
    /// Plan-level nutrient ranges keyed by nutrient code
    pub nutrient_ranges: BTreeMap<String, NutrientRange>,
}

impl PreferencesView {
    /// Derive every view from the canonical plan object in one step
    ///
    /// Flattens `plan.accept.all[]` across the four tokenized label
    /// categories (health, diet, caution, cuisine), deduplicating while
    /// preserving first-seen order, and re-derives section keys, nutrient
    /// keys, and ranges from the same source.
    #[must_use]
    pub fn from_preferences(preferences: &MealPlanPreferences) -> Self {
        let mut selected_labels = Vec::new();
        let mut seen = HashSet::new();

        if let Some(children) = preferences
            .plan
            .accept
            .as_ref()
            .and_then(|accept| accept.all.as_ref())
        {
            for child in children {
                for category in [
                    LabelCategory::Health,
                    LabelCategory::Diet,
                    LabelCategory::Caution,
                    LabelCategory::Cuisine,
                ] {
                    for label in child.category_labels(category).unwrap_or_default() {
                        if seen.insert(label.clone()) {
                            selected_labels.push(label.clone());
                        }
                    }
                }
            }
        }

        let selected_sections = preferences.plan.sections.keys().cloned().collect();

        let (selected_nutrients, nutrient_ranges) = preferences.plan.fit.as_ref().map_or_else(
            || (Vec::new(), BTreeMap::new()),
            |fit| (fit.keys().cloned().collect(), fit.clone()),
        );

        Self {
            selected_labels,
            selected_sections,
            selected_nutrients,
            nutrient_ranges,
        }
    }
}

/// Apply the bundled recommended defaults
///
/// Returns the working copy of the preferences together with its derived
/// view. The defaults are copied by value; nothing shared is ever mutated.
#[must_use]
pub fn apply_recommended() -> (MealPlanPreferences, PreferencesView) {
    let preferences = MealPlanPreferences::recommended();
    let view = PreferencesView::from_preferences(&preferences);
    (preferences, view)
}

/// Reset working preferences to the client's persisted settings
///
/// # Errors
///
/// Returns [`AppError::not_found`] when the settings record carries no
/// saved meal plan preferences.
pub fn reset_from_settings(
    settings: &ClientSettings,
) -> AppResult<(MealPlanPreferences, PreferencesView)> {
    let preferences = settings
        .meal_plan_preferences
        .clone()
        .ok_or_else(|| AppError::not_found("Saved meal plan preferences"))?;
    let view = PreferencesView::from_preferences(&preferences);
    Ok((preferences, view))
}
