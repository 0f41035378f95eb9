// ABOUTME: Reconciles a solver selection with fetched recipes into meal records
// ABOUTME: Href id extraction, slot correlation, single-serving meal derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Selection reconciliation
//!
//! The solver returns a per-day, per-section selection of recipe URIs; the
//! recipes themselves are fetched separately. Reconciliation matches each
//! selection slot to its fetched recipe by the identifier embedded in the
//! href, derives a single-serving [`Meal`] from the match via the nutrient
//! scaler, and stamps the scheduled time and the [`MealSlot`] correlation
//! key on both records so later joins never re-derive a match from
//! wall-clock time.
//!
//! A slot whose href has no fetched recipe produces no meal and no error;
//! the gap is recorded in the outcome for observability.

use chrono::{Datelike, Duration};
use tracing::warn;

use savora_core::errors::{AppError, AppResult};
use savora_core::models::{weekday_name, Meal, MealPlan, MealSlot, MealType, Recipe};

use crate::scaling::scale_nutrition;

/// Result of reconciling one plan's selection against its fetched recipes
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// Derived single-serving meals, one per matched slot
    pub meals: Vec<Meal>,
    /// Slots whose href matched no fetched recipe
    pub skipped_slots: Vec<MealSlot>,
}

/// Extract the recipe identifier embedded in a selection href or recipe URI
///
/// Two formats appear in practice: a path form (`.../recipes/v2/{id}`,
/// optionally with a query string) and a fragment form (`...#recipe_{id}`).
///
/// # Errors
///
/// Returns [`AppError::invalid_input`] when no identifier can be extracted;
/// malformed hrefs are a hard failure for the caller, unlike unmatched ones.
pub fn extract_recipe_id(href: &str) -> AppResult<String> {
    if let Some((_, fragment)) = href.split_once("#recipe_") {
        if fragment.is_empty() {
            return Err(AppError::invalid_input(format!(
                "href has an empty recipe fragment: {href}"
            )));
        }
        return Ok(fragment.to_owned());
    }

    let without_query = href.split('?').next().unwrap_or_default();
    without_query
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            AppError::invalid_input(format!("no recipe identifier found in href: {href}"))
        })
}

/// Reconcile a plan's selection with its fetched recipes
///
/// For each day `d` and section in `selection[d]`, the slot's href is
/// resolved to a fetched recipe by embedded identifier. On a match the
/// scheduled time (`start_date + d days`) and the slot key are stamped on
/// the recipe **in place** - callers must not rely on the recipe objects
/// being unmodified - and a single-serving meal (nutrients scaled by
/// `1 / yield`) is derived. Unmatched slots are skipped without error.
///
/// # Errors
///
/// Propagates identifier-extraction failures from malformed hrefs or recipe
/// URIs.
pub fn reconcile_selection(
    plan: &MealPlan,
    recipes: &mut [Recipe],
) -> AppResult<ReconcileOutcome> {
    let recipe_ids: Vec<String> = recipes
        .iter()
        .map(|recipe| extract_recipe_id(&recipe.uri))
        .collect::<AppResult<_>>()?;

    let mut outcome = ReconcileOutcome::default();

    for (day_index, day) in plan.selection.iter().enumerate() {
        let scheduled = plan.start_date + Duration::days(day_index as i64);

        for (section_name, assignment) in &day.sections {
            let slot = MealSlot::new(day_index as u32, section_name.clone());
            let wanted = extract_recipe_id(assignment.href())?;

            let Some(position) = recipe_ids.iter().position(|id| *id == wanted) else {
                outcome.skipped_slots.push(slot);
                continue;
            };

            let recipe = &mut recipes[position];
            recipe.time_scheduled = Some(scheduled);
            recipe.slot = Some(slot.clone());

            let scaled = scale_nutrition(
                &recipe.base_total_nutrients,
                &recipe.base_total_daily,
                recipe.base_total_weight,
                1.0 / recipe.recipe_yield,
            );

            outcome.meals.push(Meal {
                id: None,
                meal_plan_id: plan.id.clone(),
                recipe_id: None,
                client_id: plan.client_id.clone(),
                name: recipe.label.clone(),
                ingredient_lines: recipe.ingredient_lines.clone(),
                weight: scaled.total_weight,
                nutrients: scaled.total_nutrients,
                time_scheduled: scheduled,
                time_consumed: None,
                meal_type_key: section_name.clone(),
                meal_type: MealType::from_str_lossy(section_name),
                is_logged: false,
                day_of_the_week: weekday_name(scheduled.weekday()).to_owned(),
                slot: Some(slot),
            });
        }
    }

    if !outcome.skipped_slots.is_empty() {
        warn!(
            skipped = outcome.skipped_slots.len(),
            matched = outcome.meals.len(),
            "selection slots had no matching fetched recipe"
        );
    }

    Ok(outcome)
}

/// Assign `recipe_id` on each meal from the persisted recipe filling the
/// same slot
///
/// Meals whose recipe is still unsaved (no id) or whose slot has no
/// persisted counterpart are left untouched.
pub fn link_meals_to_recipes(meals: &mut [Meal], recipes: &[Recipe]) {
    for meal in meals {
        let Some(slot) = &meal.slot else { continue };
        meal.recipe_id = recipes
            .iter()
            .find(|recipe| recipe.slot.as_ref() == Some(slot))
            .and_then(|recipe| recipe.id.clone());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_extract_id_from_path_href() {
        let id = extract_recipe_id("https://api.example.test/api/recipes/v2/abc123").unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_extract_id_ignores_query_string() {
        let id =
            extract_recipe_id("https://api.example.test/api/recipes/v2/abc123?type=public&lang=en")
                .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_extract_id_from_fragment_href() {
        let id = extract_recipe_id("http://www.example.test/ontologies/example.owl#recipe_f2a13")
            .unwrap();
        assert_eq!(id, "f2a13");
    }

    #[test]
    fn test_extract_id_rejects_empty_fragment() {
        assert!(extract_recipe_id("http://example.test/owl#recipe_").is_err());
    }

    #[test]
    fn test_extract_id_rejects_empty_href() {
        assert!(extract_recipe_id("").is_err());
    }
}
