// ABOUTME: End-to-end meal plan generation pipeline
// ABOUTME: Normalize, solve, fetch, reconcile, and persist the plan entity graph
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Plan generation service
//!
//! The pipeline runs sequentially within one request: rate-limit check,
//! label normalization, solver select, per-href recipe fetch, selection
//! reconciliation, then the multi-entity save (plan, recipes, meals).
//!
//! Two error-wrapping layers are part of the service contract: persistence
//! failures during the multi-entity save are rethrown under
//! `"Error occurred saving meal plan recipes and meals"`, and any failure
//! of the whole operation surfaces as `"Error generating meals."` with the
//! underlying error chained as its source.

use std::sync::Arc;
use tracing::{error, info, warn};

use savora_core::constants::messages;
use savora_core::errors::{AppError, AppResult, ErrorCode};
use savora_core::models::{Meal, MealPlan, MealPlanPreferences, Recipe};
use savora_planning::labels::normalize_preferences;
use savora_planning::reconcile::{link_meals_to_recipes, reconcile_selection};
use savora_providers::recipes::RecipeSource;
use savora_providers::solver::PlanSolver;

use crate::backend::PlanStore;
use crate::rate_limiting::RequestRateLimiter;

/// Input for one plan generation run
#[derive(Debug, Clone)]
pub struct GeneratePlanRequest {
    /// Client the plan is generated for
    pub client_id: String,
    /// First day covered by the plan
    pub start_date: chrono::DateTime<chrono::Utc>,
    /// Whether meals auto-log as their scheduled time passes
    pub auto_log_meals: bool,
    /// Preferences driving the solver; normalized internally
    pub preferences: MealPlanPreferences,
}

/// Persisted result of one plan generation run
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    /// The stored meal plan
    pub plan: MealPlan,
    /// The stored recipes, ids assigned
    pub recipes: Vec<Recipe>,
    /// The stored meals, ids and recipe ids assigned
    pub meals: Vec<Meal>,
    /// Selection slots that produced no meal (unmatched or unfetchable)
    pub skipped_slots: usize,
}

/// Orchestrates the generate-and-store pipeline over injected collaborators
pub struct PlanGenerator {
    solver: Arc<dyn PlanSolver>,
    recipes: Arc<dyn RecipeSource>,
    store: Arc<dyn PlanStore>,
    limiter: Arc<RequestRateLimiter>,
}

impl PlanGenerator {
    /// Create a generator over the given collaborators
    #[must_use]
    pub fn new(
        solver: Arc<dyn PlanSolver>,
        recipes: Arc<dyn RecipeSource>,
        store: Arc<dyn PlanStore>,
        limiter: Arc<RequestRateLimiter>,
    ) -> Self {
        Self {
            solver,
            recipes,
            store,
            limiter,
        }
    }

    /// Generate a plan from preferences and persist the full entity graph
    ///
    /// # Errors
    ///
    /// Any failure surfaces as `"Error generating meals."` with the
    /// underlying error preserved as the source and its code kept for
    /// status mapping.
    pub async fn generate_and_store(
        &self,
        request: &GeneratePlanRequest,
    ) -> AppResult<GeneratedPlan> {
        match self.run(request).await {
            Ok(generated) => {
                info!(
                    client_id = %request.client_id,
                    days = generated.plan.day_count(),
                    meals = generated.meals.len(),
                    skipped = generated.skipped_slots,
                    "meal plan generated and stored"
                );
                Ok(generated)
            }
            Err(err) => {
                error!(client_id = %request.client_id, error = %err, "meal plan generation failed");
                Err(AppError::new(err.code, messages::ERROR_GENERATING_MEALS)
                    .with_client_id(request.client_id.clone())
                    .with_source(err))
            }
        }
    }

    async fn run(&self, request: &GeneratePlanRequest) -> AppResult<GeneratedPlan> {
        self.limiter.check(&request.client_id)?;

        let normalized = normalize_preferences(&request.preferences);
        let selection = self
            .solver
            .select(normalized.size, &normalized.plan)
            .await?;

        let plan = MealPlan::from_selection(
            request.client_id.clone(),
            request.start_date,
            request.auto_log_meals,
            selection,
        );

        let mut recipes = self.fetch_selection_recipes(&plan).await?;
        for recipe in &mut recipes {
            recipe.client_id = Some(request.client_id.clone());
        }

        let outcome = reconcile_selection(&plan, &mut recipes)?;

        let (stored_plan, stored_recipes, stored_meals) = self
            .persist(plan, recipes, outcome.meals)
            .await
            .map_err(|err| {
                AppError::new(err.code, messages::ERROR_SAVING_PLAN_ENTITIES).with_source(err)
            })?;

        Ok(GeneratedPlan {
            plan: stored_plan,
            recipes: stored_recipes,
            meals: stored_meals,
            skipped_slots: outcome.skipped_slots.len(),
        })
    }

    /// Fetch every selection href sequentially, tolerating hrefs the recipe
    /// API no longer knows - those slots become reconciliation gaps rather
    /// than failures
    async fn fetch_selection_recipes(&self, plan: &MealPlan) -> AppResult<Vec<Recipe>> {
        let hrefs = plan.selection_hrefs();
        let mut recipes = Vec::with_capacity(hrefs.len());

        for href in &hrefs {
            match self.recipes.fetch_by_uri(href).await {
                Ok(recipe) => recipes.push(recipe),
                Err(err) if err.code == ErrorCode::ResourceNotFound => {
                    warn!(href = %href, "selection href resolved to no recipe");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(recipes)
    }

    async fn persist(
        &self,
        plan: MealPlan,
        mut recipes: Vec<Recipe>,
        mut meals: Vec<Meal>,
    ) -> AppResult<(MealPlan, Vec<Recipe>, Vec<Meal>)> {
        let stored_plan = self.store.add_meal_plan(&plan).await?;
        let plan_id = stored_plan
            .id
            .clone()
            .ok_or_else(|| AppError::internal("backend returned a meal plan without an id"))?;

        for recipe in &mut recipes {
            recipe.meal_plan_id = Some(plan_id.clone());
        }
        let stored_recipes = self.store.add_meal_plan_recipes(&plan_id, &recipes).await?;

        for meal in &mut meals {
            meal.meal_plan_id = Some(plan_id.clone());
        }
        link_meals_to_recipes(&mut meals, &stored_recipes);
        let stored_meals = self.store.add_meal_plan_meals(&plan_id, &meals).await?;

        Ok((stored_plan, stored_recipes, stored_meals))
    }
}
