// ABOUTME: Meal planning transformation logic for the Savora platform
// ABOUTME: Label normalization, nutrient scaling, selection reconciliation, preference views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

#![deny(unsafe_code)]

//! # Savora Planning
//!
//! Pure transformation logic sitting between a client's meal plan
//! preferences and the external meal-plan solver: normalizing preference
//! labels into the solver's token convention, scaling recipe nutrients,
//! reconciling a solver selection with fetched recipes into meal records,
//! and deriving the flattened preference views the settings UI works with.
//!
//! Everything in this crate is synchronous and I/O-free; the provider and
//! application crates own the HTTP traffic around it.

/// Label normalization across the recursive filter tree
pub mod labels;

/// Flattened preference views and the defaulting/reset operations
pub mod preferences;

/// Selection-to-recipe-to-meal reconciliation
pub mod reconcile;

/// Linear nutrient scaling by a serving factor
pub mod scaling;

// Re-export the main entry points for convenience
pub use labels::{normalize_filter, normalize_plan_section, normalize_preferences};
pub use preferences::{apply_recommended, reset_from_settings, PreferencesView};
pub use reconcile::{extract_recipe_id, link_meals_to_recipes, reconcile_selection, ReconcileOutcome};
pub use scaling::{scale_nutrition, ScaledNutrition};
