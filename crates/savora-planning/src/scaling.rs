// ABOUTME: Linear nutrient scaling by a serving factor with 2-decimal rounding
// ABOUTME: scale_nutrition, ScaledNutrition, and recipe yield re-derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Nutrient scaling
//!
//! Whenever a recipe's yield changes, or a single-serving meal is derived
//! from a recipe, absolute nutrient values are re-derived from the unscaled
//! base values by a linear factor. Nutrient quantities and the total weight
//! round to 2 decimal places; `calories` is the unrounded product of the
//! unscaled base `ENERC_KCAL` quantity and the factor. The rounding
//! asymmetry is load-bearing: stored meal records were produced with it, and
//! regression comparisons against them depend on it.

use savora_core::constants::nutrients;
use savora_core::models::{Nutrient, NutrientMap, Recipe};

/// Absolute nutrition values produced by scaling a base set by a factor
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledNutrition {
    /// Scaled nutrient values, quantities rounded to 2 decimals
    pub total_nutrients: NutrientMap,
    /// Scaled daily-value percentages, quantities rounded to 2 decimals
    pub total_daily: NutrientMap,
    /// Unrounded energy: base `ENERC_KCAL` quantity times the factor, or 0
    /// when the base map lacks the key
    pub calories: f64,
    /// Scaled total weight, rounded to 2 decimals
    pub total_weight: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn scale_map(base: &NutrientMap, factor: f64) -> NutrientMap {
    base.iter()
        .map(|(code, nutrient)| {
            (
                code.clone(),
                Nutrient {
                    label: nutrient.label.clone(),
                    quantity: round2(nutrient.quantity * factor),
                    unit: nutrient.unit.clone(),
                },
            )
        })
        .collect()
}

/// Scale base nutrition values linearly by `factor`
///
/// Pure function: inputs are never mutated and a fresh object graph is
/// returned. A zero or negative factor is applied mechanically; validating
/// serving counts is the caller's concern.
#[must_use]
pub fn scale_nutrition(
    base_nutrients: &NutrientMap,
    base_daily: &NutrientMap,
    base_weight: f64,
    factor: f64,
) -> ScaledNutrition {
    let calories = base_nutrients
        .get(nutrients::ENERC_KCAL)
        .map_or(0.0, |n| n.quantity)
        * factor;

    ScaledNutrition {
        total_nutrients: scale_map(base_nutrients, factor),
        total_daily: scale_map(base_daily, factor),
        calories,
        total_weight: round2(base_weight * factor),
    }
}

/// Re-derive a recipe's absolute values for a new yield
///
/// Keeps the invariant `total_nutrients[k].quantity ==
/// base_total_nutrients[k].quantity * (yield / base_yield)`; the base
/// fields are left untouched.
#[must_use]
pub fn apply_yield(recipe: &Recipe, new_yield: f64) -> Recipe {
    let factor = new_yield / recipe.base_yield;
    let scaled = scale_nutrition(
        &recipe.base_total_nutrients,
        &recipe.base_total_daily,
        recipe.base_total_weight,
        factor,
    );

    Recipe {
        recipe_yield: new_yield,
        calories: scaled.calories,
        total_weight: scaled.total_weight,
        total_nutrients: scaled.total_nutrients,
        total_daily: scaled.total_daily,
        ..recipe.clone()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn base_map(kcal: f64, protein: f64) -> NutrientMap {
        let mut map = NutrientMap::new();
        map.insert(
            nutrients::ENERC_KCAL.to_owned(),
            Nutrient::new("Energy", kcal, "kcal"),
        );
        map.insert(
            nutrients::PROCNT.to_owned(),
            Nutrient::new("Protein", protein, "g"),
        );
        map
    }

    #[test]
    fn test_scaling_linearity() {
        let nutrients_map = base_map(800.0, 30.333);
        let daily = base_map(40.0, 60.666);

        let scaled = scale_nutrition(&nutrients_map, &daily, 500.0, 2.0);

        assert_eq!(
            scaled.total_nutrients[nutrients::ENERC_KCAL].quantity,
            1600.0
        );
        assert_eq!(scaled.total_nutrients[nutrients::PROCNT].quantity, 60.67);
        assert_eq!(scaled.total_daily[nutrients::PROCNT].quantity, 121.33);
        assert_eq!(scaled.total_weight, 1000.0);
        assert_eq!(scaled.calories, 1600.0);
    }

    #[test]
    fn test_scaling_identity() {
        let nutrients_map = base_map(520.5, 12.345);
        let daily = NutrientMap::new();

        let scaled = scale_nutrition(&nutrients_map, &daily, 321.0, 1.0);

        assert_eq!(scaled.total_weight, 321.0);
        assert_eq!(scaled.calories, 520.5);
        // Quantities round to 2 decimals even at factor 1
        assert_eq!(scaled.total_nutrients[nutrients::PROCNT].quantity, 12.35);
    }

    #[test]
    fn test_calories_stay_unrounded_while_quantities_round() {
        // 100.555 * 0.5 = 50.2775: calories keep full precision, the
        // nutrient quantity rounds to 50.28
        let nutrients_map = base_map(100.555, 0.0);

        let scaled = scale_nutrition(&nutrients_map, &NutrientMap::new(), 0.0, 0.5);

        assert_eq!(scaled.calories, 100.555 * 0.5);
        assert_eq!(
            scaled.total_nutrients[nutrients::ENERC_KCAL].quantity,
            50.28
        );
    }

    #[test]
    fn test_missing_energy_key_yields_zero_calories() {
        let mut nutrients_map = NutrientMap::new();
        nutrients_map.insert(
            nutrients::PROCNT.to_owned(),
            Nutrient::new("Protein", 10.0, "g"),
        );

        let scaled = scale_nutrition(&nutrients_map, &NutrientMap::new(), 100.0, 3.0);
        assert_eq!(scaled.calories, 0.0);
    }

    #[test]
    fn test_zero_factor_applies_mechanically() {
        let nutrients_map = base_map(800.0, 30.0);

        let scaled = scale_nutrition(&nutrients_map, &NutrientMap::new(), 400.0, 0.0);

        assert_eq!(scaled.calories, 0.0);
        assert_eq!(scaled.total_weight, 0.0);
        assert_eq!(scaled.total_nutrients[nutrients::PROCNT].quantity, 0.0);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let nutrients_map = base_map(800.0, 30.0);
        let daily = NutrientMap::new();
        let before = nutrients_map.clone();

        let _ = scale_nutrition(&nutrients_map, &daily, 400.0, 2.0);
        assert_eq!(nutrients_map, before);
    }
}
