// ABOUTME: Label normalization across the recursive preference filter tree
// ABOUTME: Rewrites tokenized categories to the solver's uppercase underscored convention
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Label normalization
//!
//! The settings UI works with human-readable labels ("gluten-free",
//! "Sugar-Conscious"); the external solver expects its token convention
//! (`GLUTEN_FREE`, `SUGAR_CONSCIOUS`) for the `health`, `diet`, `caution`,
//! and `cuisine` categories. The free-text categories (`meal`, `dish`,
//! `only-dish`, `source`, `source-name`) are matched verbatim by the solver
//! and must pass through untouched.
//!
//! Normalization walks `all`, `any`, `not`, and both arms of `when` before
//! the node's own leaves, tolerates any combination of present/absent
//! fields, and keeps absent fields absent - defaulting them to empty lists
//! would assert a reject-all constraint the user never expressed.

use savora_core::models::{MealFilter, MealPlanPreferences, MealSection, PlanSection, WhenClause};

/// Rewrite one label into the solver's token convention
#[must_use]
pub fn normalize_token(label: &str) -> String {
    label.to_uppercase().replace('-', "_")
}

fn normalize_token_list(labels: &[String]) -> Vec<String> {
    labels.iter().map(|label| normalize_token(label)).collect()
}

/// Produce a structurally identical filter tree with tokenized categories
/// normalized
///
/// Pure function of its input; the original tree is left untouched.
#[must_use]
pub fn normalize_filter(filter: &MealFilter) -> MealFilter {
    MealFilter {
        all: filter
            .all
            .as_ref()
            .map(|children| children.iter().map(normalize_filter).collect()),
        any: filter
            .any
            .as_ref()
            .map(|children| children.iter().map(normalize_filter).collect()),
        not: filter
            .not
            .as_ref()
            .map(|child| Box::new(normalize_filter(child))),
        when: filter.when.as_ref().map(|clause| WhenClause {
            condition: Box::new(normalize_filter(&clause.condition)),
            require: Box::new(normalize_filter(&clause.require)),
        }),
        health: filter.health.as_deref().map(normalize_token_list),
        diet: filter.diet.as_deref().map(normalize_token_list),
        caution: filter.caution.as_deref().map(normalize_token_list),
        cuisine: filter.cuisine.as_deref().map(normalize_token_list),
        meal: filter.meal.clone(),
        dish: filter.dish.clone(),
        only_dish: filter.only_dish.clone(),
        source: filter.source.clone(),
        source_name: filter.source_name.clone(),
    }
}

fn normalize_section(section: &MealSection) -> MealSection {
    MealSection {
        accept: section.accept.as_ref().map(normalize_filter),
        fit: section.fit.clone(),
        exclude: section.exclude.clone(),
    }
}

/// Normalize a plan-wide section including all per-slot overrides
#[must_use]
pub fn normalize_plan_section(plan: &PlanSection) -> PlanSection {
    PlanSection {
        accept: plan.accept.as_ref().map(normalize_filter),
        fit: plan.fit.clone(),
        exclude: plan.exclude.clone(),
        sections: plan
            .sections
            .iter()
            .map(|(name, section)| (name.clone(), normalize_section(section)))
            .collect(),
    }
}

/// Normalize a full preferences aggregate ahead of a solver request
#[must_use]
pub fn normalize_preferences(preferences: &MealPlanPreferences) -> MealPlanPreferences {
    MealPlanPreferences {
        id: preferences.id.clone(),
        client_settings_id: preferences.client_settings_id.clone(),
        size: preferences.size,
        plan: normalize_plan_section(&preferences.plan),
    }
}
