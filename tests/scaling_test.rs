// ABOUTME: Integration tests for linear nutrient scaling
// ABOUTME: Pins linearity, identity, and the calorie-rounding asymmetry
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Tests for nutrient scaling including:
//! - Linearity and identity of the scaling factor
//! - The load-bearing calorie-rounding asymmetry
//! - Yield re-derivation keeping the base/total invariant

use savora_core::models::{Nutrient, NutrientMap, Recipe};
use savora_planning::scaling::{apply_yield, scale_nutrition};

fn nutrient_map(entries: &[(&str, f64)]) -> NutrientMap {
    entries
        .iter()
        .map(|(code, quantity)| {
            (
                (*code).to_owned(),
                Nutrient::new(*code, *quantity, if *code == "ENERC_KCAL" { "kcal" } else { "g" }),
            )
        })
        .collect()
}

// ============================================================================
// Linearity and identity
// ============================================================================

#[test]
fn test_factor_two_doubles_everything() {
    let base = nutrient_map(&[("ENERC_KCAL", 800.0), ("PROCNT", 25.5), ("FAT", 10.25)]);
    let daily = nutrient_map(&[("ENERC_KCAL", 40.0)]);

    let scaled = scale_nutrition(&base, &daily, 350.0, 2.0);

    assert_eq!(scaled.total_nutrients["ENERC_KCAL"].quantity, 1600.0);
    assert_eq!(scaled.total_nutrients["PROCNT"].quantity, 51.0);
    assert_eq!(scaled.total_nutrients["FAT"].quantity, 20.5);
    assert_eq!(scaled.total_daily["ENERC_KCAL"].quantity, 80.0);
    assert_eq!(scaled.total_weight, 700.0);
    assert_eq!(scaled.calories, 1600.0);
}

#[test]
fn test_factor_one_reproduces_inputs_up_to_quantity_rounding() {
    let base = nutrient_map(&[("ENERC_KCAL", 612.75), ("PROCNT", 18.123)]);
    let daily = nutrient_map(&[("PROCNT", 36.246)]);

    let scaled = scale_nutrition(&base, &daily, 421.0, 1.0);

    assert_eq!(scaled.total_weight, 421.0);
    assert_eq!(scaled.calories, 612.75);
    assert_eq!(scaled.total_nutrients["ENERC_KCAL"].quantity, 612.75);
    // Only the 2-decimal quantity rounding may differ from the input
    assert_eq!(scaled.total_nutrients["PROCNT"].quantity, 18.12);
    assert_eq!(scaled.total_daily["PROCNT"].quantity, 36.25);
}

#[test]
fn test_labels_and_units_are_preserved() {
    let base = nutrient_map(&[("PROCNT", 18.0)]);

    let scaled = scale_nutrition(&base, &NutrientMap::new(), 100.0, 0.5);

    assert_eq!(scaled.total_nutrients["PROCNT"].label, "PROCNT");
    assert_eq!(scaled.total_nutrients["PROCNT"].unit, "g");
}

// ============================================================================
// Calorie asymmetry regression
// ============================================================================

// Stored meal records were produced with unrounded calories next to rounded
// quantities; these pins keep that behavior from being "fixed" silently.

#[test]
fn test_calories_keep_full_precision() {
    let base = nutrient_map(&[("ENERC_KCAL", 333.333)]);

    let scaled = scale_nutrition(&base, &NutrientMap::new(), 0.0, 1.0 / 3.0);

    assert_eq!(scaled.calories, 333.333 * (1.0 / 3.0));
    assert_eq!(scaled.total_nutrients["ENERC_KCAL"].quantity, 111.11);
}

#[test]
fn test_missing_energy_key_gives_zero_calories() {
    let base = nutrient_map(&[("PROCNT", 12.0)]);

    let scaled = scale_nutrition(&base, &NutrientMap::new(), 50.0, 2.0);

    assert_eq!(scaled.calories, 0.0);
    assert_eq!(scaled.total_nutrients["PROCNT"].quantity, 24.0);
}

// ============================================================================
// Yield re-derivation
// ============================================================================

fn recipe_with_yield(base_yield: f64) -> Recipe {
    let base = nutrient_map(&[("ENERC_KCAL", 900.0), ("PROCNT", 60.0)]);
    Recipe {
        id: None,
        meal_plan_id: None,
        client_id: None,
        uri: "http://example.test/recipes/v2/abc".to_owned(),
        label: "Casserole".to_owned(),
        ingredient_lines: Vec::new(),
        ingredients: Vec::new(),
        recipe_yield: base_yield,
        base_yield,
        calories: 900.0,
        total_weight: 600.0,
        total_nutrients: base.clone(),
        total_daily: NutrientMap::new(),
        base_total_nutrients: base,
        base_total_daily: NutrientMap::new(),
        base_total_weight: 600.0,
        meal_type: vec!["lunch/dinner".to_owned()],
        time_scheduled: None,
        slot: None,
    }
}

#[test]
fn test_apply_yield_keeps_base_total_invariant() {
    let recipe = apply_yield(&recipe_with_yield(3.0), 6.0);

    // total == base * (yield / base_yield) for every nutrient code
    for (code, nutrient) in &recipe.total_nutrients {
        let base = recipe.base_total_nutrients[code].quantity;
        assert_eq!(
            nutrient.quantity,
            (base * (recipe.recipe_yield / recipe.base_yield) * 100.0).round() / 100.0
        );
    }
    assert_eq!(recipe.recipe_yield, 6.0);
    assert_eq!(recipe.base_yield, 3.0);
    assert_eq!(recipe.total_weight, 1200.0);
    assert_eq!(recipe.calories, 1800.0);
}

#[test]
fn test_apply_yield_leaves_base_values_untouched() {
    let original = recipe_with_yield(4.0);
    let rescaled = apply_yield(&original, 1.0);

    assert_eq!(rescaled.base_total_nutrients, original.base_total_nutrients);
    assert_eq!(rescaled.base_total_weight, original.base_total_weight);
    assert_eq!(rescaled.total_nutrients["ENERC_KCAL"].quantity, 225.0);
}
