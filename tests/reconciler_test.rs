// ABOUTME: Integration tests for selection-to-recipe-to-meal reconciliation
// ABOUTME: Covers slot matching, date assignment, gap tolerance, and slot linking
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Tests for the reconciler including:
//! - Matching selection hrefs to fetched recipes by embedded identifier
//! - Scheduled date and day-of-week assignment per day index
//! - Silent gap tolerance with skipped-slot observability
//! - Post-persistence meal-to-recipe linking via the slot key

use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;

use savora_core::models::{
    MealPlan, MealSlot, MealType, Nutrient, NutrientMap, Recipe, SectionAssignment, SelectionDay,
};
use savora_planning::reconcile::{link_meals_to_recipes, reconcile_selection};

fn test_recipe(id: &str, recipe_yield: f64, kcal: f64) -> Recipe {
    let mut nutrients = NutrientMap::new();
    nutrients.insert(
        "ENERC_KCAL".to_owned(),
        Nutrient::new("Energy", kcal, "kcal"),
    );

    Recipe {
        id: None,
        meal_plan_id: None,
        client_id: None,
        uri: format!("http://www.edamam.com/ontologies/edamam.owl#recipe_{id}"),
        label: format!("Recipe {id}"),
        ingredient_lines: vec!["1 cup of something".to_owned()],
        ingredients: Vec::new(),
        recipe_yield,
        base_yield: recipe_yield,
        calories: kcal,
        total_weight: 400.0,
        total_nutrients: nutrients.clone(),
        total_daily: NutrientMap::new(),
        base_total_nutrients: nutrients,
        base_total_daily: NutrientMap::new(),
        base_total_weight: 400.0,
        meal_type: vec!["breakfast".to_owned()],
        time_scheduled: None,
        slot: None,
    }
}

fn selection_day(entries: &[(&str, &str)]) -> SelectionDay {
    let mut sections = BTreeMap::new();
    for (section, id) in entries {
        sections.insert(
            (*section).to_owned(),
            SectionAssignment::new(
                format!("https://api.edamam.com/api/recipes/v2/{id}?type=public"),
                None,
            ),
        );
    }
    SelectionDay { sections }
}

fn two_day_plan() -> MealPlan {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut plan = MealPlan::from_selection(
        "client-1",
        start,
        false,
        vec![
            selection_day(&[("Breakfast", "aaa"), ("Lunch", "bbb")]),
            selection_day(&[("Breakfast", "ccc"), ("Lunch", "ddd")]),
        ],
    );
    plan.id = Some("plan-1".to_owned());
    plan
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_full_selection_produces_one_meal_per_slot() {
    let plan = two_day_plan();
    let mut recipes = vec![
        test_recipe("aaa", 2.0, 800.0),
        test_recipe("bbb", 2.0, 800.0),
        test_recipe("ccc", 2.0, 800.0),
        test_recipe("ddd", 2.0, 800.0),
    ];

    let outcome = reconcile_selection(&plan, &mut recipes).unwrap();

    assert_eq!(outcome.meals.len(), 4);
    assert!(outcome.skipped_slots.is_empty());
}

#[test]
fn test_meals_carry_scheduled_dates_and_day_names() {
    let plan = two_day_plan();
    let mut recipes = vec![
        test_recipe("aaa", 2.0, 800.0),
        test_recipe("bbb", 2.0, 800.0),
        test_recipe("ccc", 2.0, 800.0),
        test_recipe("ddd", 2.0, 800.0),
    ];

    let outcome = reconcile_selection(&plan, &mut recipes).unwrap();

    // 2024-01-01 is a Monday
    let day_zero: Vec<_> = outcome
        .meals
        .iter()
        .filter(|meal| meal.slot.as_ref().unwrap().day_index == 0)
        .collect();
    assert_eq!(day_zero.len(), 2);
    for meal in day_zero {
        assert_eq!(meal.time_scheduled, plan.start_date);
        assert_eq!(meal.day_of_the_week, "Monday");
    }

    let day_one = outcome
        .meals
        .iter()
        .find(|meal| meal.slot.as_ref().unwrap().day_index == 1)
        .unwrap();
    assert_eq!(day_one.day_of_the_week, "Tuesday");
}

#[test]
fn test_meal_nutrients_are_single_serving() {
    let plan = two_day_plan();
    let mut recipes = vec![
        test_recipe("aaa", 2.0, 800.0),
        test_recipe("bbb", 4.0, 800.0),
        test_recipe("ccc", 2.0, 800.0),
        test_recipe("ddd", 2.0, 800.0),
    ];

    let outcome = reconcile_selection(&plan, &mut recipes).unwrap();

    let breakfast = outcome
        .meals
        .iter()
        .find(|meal| meal.slot.as_ref().unwrap() == &MealSlot::new(0, "Breakfast"))
        .unwrap();
    assert_eq!(breakfast.nutrients["ENERC_KCAL"].quantity, 400.0);
    assert_eq!(breakfast.weight, 200.0);
    assert_eq!(breakfast.meal_type, MealType::Breakfast);
    assert_eq!(breakfast.meal_type_key, "Breakfast");
    assert_eq!(breakfast.name, "Recipe aaa");
    assert_eq!(breakfast.meal_plan_id.as_deref(), Some("plan-1"));

    // yield 4 -> quarter portions
    let lunch = outcome
        .meals
        .iter()
        .find(|meal| meal.slot.as_ref().unwrap() == &MealSlot::new(0, "Lunch"))
        .unwrap();
    assert_eq!(lunch.nutrients["ENERC_KCAL"].quantity, 200.0);
}

#[test]
fn test_recipes_get_the_same_scheduled_time_in_place() {
    let plan = two_day_plan();
    let mut recipes = vec![
        test_recipe("aaa", 2.0, 800.0),
        test_recipe("bbb", 2.0, 800.0),
        test_recipe("ccc", 2.0, 800.0),
        test_recipe("ddd", 2.0, 800.0),
    ];

    let outcome = reconcile_selection(&plan, &mut recipes).unwrap();

    for meal in &outcome.meals {
        let recipe = recipes
            .iter()
            .find(|candidate| candidate.slot == meal.slot)
            .unwrap();
        assert_eq!(recipe.time_scheduled, Some(meal.time_scheduled));
    }
}

// ============================================================================
// Gap tolerance
// ============================================================================

#[test]
fn test_unmatched_slot_is_skipped_without_error() {
    let plan = two_day_plan();
    // "ddd" was never fetched
    let mut recipes = vec![
        test_recipe("aaa", 2.0, 800.0),
        test_recipe("bbb", 2.0, 800.0),
        test_recipe("ccc", 2.0, 800.0),
    ];

    let outcome = reconcile_selection(&plan, &mut recipes).unwrap();

    assert_eq!(outcome.meals.len(), 3);
    assert_eq!(outcome.skipped_slots, vec![MealSlot::new(1, "Lunch")]);
}

#[test]
fn test_malformed_href_is_a_hard_error() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut sections = BTreeMap::new();
    sections.insert(
        "Breakfast".to_owned(),
        SectionAssignment::new("http://example.test/owl#recipe_", None),
    );
    let plan = MealPlan::from_selection(
        "client-1",
        start,
        false,
        vec![SelectionDay { sections }],
    );

    let mut recipes = vec![test_recipe("aaa", 2.0, 800.0)];
    assert!(reconcile_selection(&plan, &mut recipes).is_err());
}

// ============================================================================
// Slot linking
// ============================================================================

#[test]
fn test_link_assigns_recipe_ids_by_slot() {
    let plan = two_day_plan();
    let mut recipes = vec![
        test_recipe("aaa", 2.0, 800.0),
        test_recipe("bbb", 2.0, 800.0),
        test_recipe("ccc", 2.0, 800.0),
        test_recipe("ddd", 2.0, 800.0),
    ];

    let mut outcome = reconcile_selection(&plan, &mut recipes).unwrap();

    // Simulate persistence assigning ids
    for (index, recipe) in recipes.iter_mut().enumerate() {
        recipe.id = Some(format!("recipe-{index}"));
    }

    link_meals_to_recipes(&mut outcome.meals, &recipes);

    for meal in &outcome.meals {
        let recipe = recipes
            .iter()
            .find(|candidate| candidate.slot == meal.slot)
            .unwrap();
        assert_eq!(meal.recipe_id, recipe.id);
    }
}

#[test]
fn test_link_leaves_meals_without_persisted_recipe_untouched() {
    let plan = two_day_plan();
    let mut recipes = vec![
        test_recipe("aaa", 2.0, 800.0),
        test_recipe("bbb", 2.0, 800.0),
        test_recipe("ccc", 2.0, 800.0),
        test_recipe("ddd", 2.0, 800.0),
    ];

    let mut outcome = reconcile_selection(&plan, &mut recipes).unwrap();
    // No ids assigned: linking must not invent any
    link_meals_to_recipes(&mut outcome.meals, &recipes);

    assert!(outcome.meals.iter().all(|meal| meal.recipe_id.is_none()));
}
