// ABOUTME: End-to-end plan generation tests over mock solver, recipe, and backend clients
// ABOUTME: Covers the full pipeline, gap tolerance, error wrapping, and rate limiting
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! End-to-end tests for the plan generation service:
//! - Full generate-and-store pipeline against mock collaborators
//! - Unfetchable selection hrefs degrade to skipped slots
//! - Persistence failures wrap under the documented messages
//! - The per-client rate limit applies before any external call

use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;
use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;

use savora_core::constants::messages;
use savora_core::errors::ErrorCode;
use savora_core::models::{
    LabelCategory, MealFilter, MealPlanPreferences, MealSlot, Nutrient, NutrientMap, PlanSection,
    Recipe, SectionAssignment, SelectionDay,
};
use savora_planner::backend::MockBackend;
use savora_planner::rate_limiting::{RateLimitConfig, RequestRateLimiter};
use savora_planner::services::plan_generator::{GeneratePlanRequest, PlanGenerator};
use savora_providers::recipes::MockRecipeClient;
use savora_providers::solver::MockSolverClient;

fn href(id: &str) -> String {
    format!("https://api.edamam.com/api/recipes/v2/{id}?type=public")
}

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
        ingredient_lines: vec!["2 cups of something".to_owned()],
        ingredients: Vec::new(),
        recipe_yield,
        base_yield: recipe_yield,
        calories: kcal,
        total_weight: 500.0,
        total_nutrients: nutrients.clone(),
        total_daily: NutrientMap::new(),
        base_total_nutrients: nutrients,
        base_total_daily: NutrientMap::new(),
        base_total_weight: 500.0,
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
            SectionAssignment::new(href(id), None),
        );
    }
    SelectionDay { sections }
}

fn two_day_selection() -> Vec<SelectionDay> {
    vec![
        selection_day(&[("Breakfast", "aaa"), ("Lunch", "bbb")]),
        selection_day(&[("Breakfast", "ccc"), ("Lunch", "ddd")]),
    ]
}

fn recipe_client_for(ids: &[&str]) -> MockRecipeClient {
    let mut client = MockRecipeClient::new();
    for id in ids {
        client = client.with_recipe(href(id), test_recipe(id, 2.0, 800.0));
    }
    client
}

fn preferences(size: u32) -> MealPlanPreferences {
    MealPlanPreferences {
        id: None,
        client_settings_id: None,
        size,
        plan: PlanSection {
            accept: Some(MealFilter::labels(LabelCategory::Health, ["gluten-free"])),
            ..PlanSection::default()
        },
    }
}

fn request(client_id: &str, size: u32) -> GeneratePlanRequest {
    GeneratePlanRequest {
        client_id: client_id.to_owned(),
        start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        auto_log_meals: false,
        preferences: preferences(size),
    }
}

fn relaxed_limiter() -> Arc<RequestRateLimiter> {
    Arc::new(RequestRateLimiter::new(RateLimitConfig {
        max_requests: 100,
        window: Duration::from_secs(60),
    }))
}

// ============================================================================
// Full pipeline
// ============================================================================

#[tokio::test]
async fn test_generate_and_store_full_pipeline() {
    let backend = Arc::new(MockBackend::new());
    let generator = PlanGenerator::new(
        Arc::new(MockSolverClient::returning(two_day_selection())),
        Arc::new(recipe_client_for(&["aaa", "bbb", "ccc", "ddd"])),
        backend.clone(),
        relaxed_limiter(),
    );

    let generated = generator
        .generate_and_store(&request("client-1", 2))
        .await
        .unwrap();

    // 2 days x {Breakfast, Lunch}, recipes with yield 2 and 800 kcal
    assert_eq!(generated.meals.len(), 4);
    assert_eq!(generated.recipes.len(), 4);
    assert_eq!(generated.skipped_slots, 0);
    assert!(generated.plan.id.is_some());
    assert_eq!(
        generated.plan.end_date,
        generated.plan.start_date + chrono::Duration::days(1)
    );

    for meal in &generated.meals {
        assert_eq!(meal.nutrients["ENERC_KCAL"].quantity, 400.0);
        assert_eq!(meal.meal_plan_id, generated.plan.id);
        let expected_day = match meal.slot.as_ref().unwrap().day_index {
            0 => "Monday",
            _ => "Tuesday",
        };
        assert_eq!(meal.day_of_the_week, expected_day);
    }

    // Persisted via the backend, and linked recipe ids resolve by slot
    assert_eq!(backend.saved_plans().len(), 1);
    assert_eq!(backend.saved_meals().len(), 4);
    let stored_recipes = backend.saved_recipes();
    for meal in &generated.meals {
        let recipe = stored_recipes
            .iter()
            .find(|candidate| candidate.slot == meal.slot)
            .unwrap();
        assert_eq!(meal.recipe_id, recipe.id);
        assert!(meal.recipe_id.is_some());
        assert_eq!(recipe.time_scheduled, Some(meal.time_scheduled));
    }
}

#[tokio::test]
async fn test_recipes_carry_client_and_plan_ownership() {
    let backend = Arc::new(MockBackend::new());
    let generator = PlanGenerator::new(
        Arc::new(MockSolverClient::returning(two_day_selection())),
        Arc::new(recipe_client_for(&["aaa", "bbb", "ccc", "ddd"])),
        backend.clone(),
        relaxed_limiter(),
    );

    let generated = generator
        .generate_and_store(&request("client-7", 2))
        .await
        .unwrap();

    for recipe in &generated.recipes {
        assert_eq!(recipe.client_id.as_deref(), Some("client-7"));
        assert_eq!(recipe.meal_plan_id, generated.plan.id);
    }
}

// ============================================================================
// Gap tolerance
// ============================================================================

#[tokio::test]
async fn test_unfetchable_href_becomes_skipped_slot() {
    // "ddd" is not known to the recipe API
    let generator = PlanGenerator::new(
        Arc::new(MockSolverClient::returning(two_day_selection())),
        Arc::new(recipe_client_for(&["aaa", "bbb", "ccc"])),
        Arc::new(MockBackend::new()),
        relaxed_limiter(),
    );

    let generated = generator
        .generate_and_store(&request("client-1", 2))
        .await
        .unwrap();

    assert_eq!(generated.meals.len(), 3);
    assert_eq!(generated.skipped_slots, 1);
    assert!(!generated
        .meals
        .iter()
        .any(|meal| meal.slot.as_ref().unwrap() == &MealSlot::new(1, "Lunch")));
}

// ============================================================================
// Error wrapping
// ============================================================================

#[tokio::test]
async fn test_persistence_failure_wraps_under_documented_messages() {
    let generator = PlanGenerator::new(
        Arc::new(MockSolverClient::returning(two_day_selection())),
        Arc::new(recipe_client_for(&["aaa", "bbb", "ccc", "ddd"])),
        Arc::new(MockBackend::failing_on_recipes()),
        relaxed_limiter(),
    );

    let error = generator
        .generate_and_store(&request("client-1", 2))
        .await
        .unwrap_err();

    assert_eq!(error.message, messages::ERROR_GENERATING_MEALS);
    let source = error.source().unwrap().to_string();
    assert!(source.contains(messages::ERROR_SAVING_PLAN_ENTITIES));
}

#[tokio::test]
async fn test_solver_failure_surfaces_as_generation_error() {
    let generator = PlanGenerator::new(
        Arc::new(MockSolverClient::failing("solver exploded")),
        Arc::new(MockRecipeClient::new()),
        Arc::new(MockBackend::new()),
        relaxed_limiter(),
    );

    let error = generator
        .generate_and_store(&request("client-1", 2))
        .await
        .unwrap_err();

    assert_eq!(error.message, messages::ERROR_GENERATING_MEALS);
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_zero_size_preferences_are_rejected() {
    let generator = PlanGenerator::new(
        Arc::new(MockSolverClient::returning(Vec::new())),
        Arc::new(MockRecipeClient::new()),
        Arc::new(MockBackend::new()),
        relaxed_limiter(),
    );

    let error = generator
        .generate_and_store(&request("client-1", 0))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_rate_limit_applies_per_client() {
    let limiter = Arc::new(RequestRateLimiter::new(RateLimitConfig {
        max_requests: 1,
        window: Duration::from_secs(60),
    }));
    let generator = PlanGenerator::new(
        Arc::new(MockSolverClient::returning(two_day_selection())),
        Arc::new(recipe_client_for(&["aaa", "bbb", "ccc", "ddd"])),
        Arc::new(MockBackend::new()),
        limiter,
    );

    assert!(generator
        .generate_and_store(&request("client-1", 2))
        .await
        .is_ok());

    let error = generator
        .generate_and_store(&request("client-1", 2))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::RateLimitExceeded);

    // A different client is unaffected
    assert!(generator
        .generate_and_store(&request("client-2", 2))
        .await
        .is_ok());
}
