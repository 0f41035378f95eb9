// ABOUTME: Backend persistence REST client for plans, recipes, meals, and preferences
// ABOUTME: PlanStore seam, HTTP client implementation, and in-memory mock for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Backend persistence API client
//!
//! The backend owns storage; this service only talks to its REST CRUD
//! endpoints. The single contract the planning flow relies on is that every
//! create endpoint returns the stored entity with an assigned id.
//! Preferences are created and updated exclusively through the explicit
//! store/update calls here - nothing creates them implicitly.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

use savora_core::errors::{AppError, AppResult};
use savora_core::models::{ClientSettings, Ingredient, Meal, MealPlan, MealPlanPreferences, Recipe};
use savora_providers::http_client::shared_client;

/// Service name used in logs and error messages
const SERVICE_NAME: &str = "backend API";

/// Backend client configuration
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// Base URL of the backend REST API
    pub base_url: String,
    /// Bearer token attached to every request, when present
    pub auth_token: Option<String>,
}

/// Seam for persisting the plan / recipe / meal graph, mockable in tests
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Create a meal plan; the returned plan carries its assigned id
    ///
    /// # Errors
    ///
    /// Returns an external-service error on transport or backend failures.
    async fn add_meal_plan(&self, plan: &MealPlan) -> AppResult<MealPlan>;

    /// Update an existing meal plan
    ///
    /// # Errors
    ///
    /// Returns an external-service error on transport or backend failures.
    async fn update_meal_plan(&self, plan: &MealPlan) -> AppResult<MealPlan>;

    /// Create the recipes belonging to a plan; each returned recipe carries
    /// its assigned id
    ///
    /// # Errors
    ///
    /// Returns an external-service error on transport or backend failures.
    async fn add_meal_plan_recipes(
        &self,
        plan_id: &str,
        recipes: &[Recipe],
    ) -> AppResult<Vec<Recipe>>;

    /// Create the meals belonging to a plan; each returned meal carries its
    /// assigned id
    ///
    /// # Errors
    ///
    /// Returns an external-service error on transport or backend failures.
    async fn add_meal_plan_meals(&self, plan_id: &str, meals: &[Meal]) -> AppResult<Vec<Meal>>;

    /// Create structured ingredients under a persisted recipe
    ///
    /// # Errors
    ///
    /// Returns an external-service error on transport or backend failures.
    async fn add_ingredients(
        &self,
        recipe_id: &str,
        ingredients: &[Ingredient],
    ) -> AppResult<Vec<Ingredient>>;

    /// Fetch a client's settings record
    ///
    /// # Errors
    ///
    /// Returns [`AppError::not_found`] for unknown clients.
    async fn fetch_client_settings(&self, client_id: &str) -> AppResult<ClientSettings>;

    /// Store preferences under a settings record for the first time
    ///
    /// # Errors
    ///
    /// Returns an external-service error on transport or backend failures.
    async fn store_preferences(
        &self,
        settings_id: &str,
        preferences: &MealPlanPreferences,
    ) -> AppResult<MealPlanPreferences>;

    /// Update previously stored preferences
    ///
    /// # Errors
    ///
    /// Returns an external-service error on transport or backend failures.
    async fn update_preferences(
        &self,
        settings_id: &str,
        preferences: &MealPlanPreferences,
    ) -> AppResult<MealPlanPreferences>;
}

/// HTTP client for the backend persistence API
pub struct BackendClient {
    config: BackendConfig,
}

impl BackendClient {
    /// Create a backend client
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.config.base_url);
        let mut builder = shared_client().request(method, url);
        if let Some(token) = &self.config.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<T> {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Backend resource {path}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = format!("HTTP {status} for {path}: {body}");
            return if status.is_server_error() {
                Err(AppError::external_unavailable(SERVICE_NAME, detail))
            } else {
                Err(AppError::external_service(SERVICE_NAME, detail))
            };
        }

        response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error for {path}: {e}"))
        })
    }
}

#[async_trait]
impl PlanStore for BackendClient {
    #[instrument(skip(self, plan), fields(api_call = "add_meal_plan"))]
    async fn add_meal_plan(&self, plan: &MealPlan) -> AppResult<MealPlan> {
        self.send_json(reqwest::Method::POST, "/meal-plans", Some(plan))
            .await
    }

    #[instrument(skip(self, plan), fields(api_call = "update_meal_plan"))]
    async fn update_meal_plan(&self, plan: &MealPlan) -> AppResult<MealPlan> {
        let id = plan
            .id
            .as_deref()
            .ok_or_else(|| AppError::invalid_input("Cannot update a meal plan without an id"))?;
        self.send_json(
            reqwest::Method::PUT,
            &format!("/meal-plans/{id}"),
            Some(plan),
        )
        .await
    }

    #[instrument(skip(self, recipes), fields(api_call = "add_meal_plan_recipes", count = recipes.len()))]
    async fn add_meal_plan_recipes(
        &self,
        plan_id: &str,
        recipes: &[Recipe],
    ) -> AppResult<Vec<Recipe>> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/meal-plans/{plan_id}/recipes"),
            Some(&recipes),
        )
        .await
    }

    #[instrument(skip(self, meals), fields(api_call = "add_meal_plan_meals", count = meals.len()))]
    async fn add_meal_plan_meals(&self, plan_id: &str, meals: &[Meal]) -> AppResult<Vec<Meal>> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/meal-plans/{plan_id}/meals"),
            Some(&meals),
        )
        .await
    }

    #[instrument(skip(self, ingredients), fields(api_call = "add_ingredients", count = ingredients.len()))]
    async fn add_ingredients(
        &self,
        recipe_id: &str,
        ingredients: &[Ingredient],
    ) -> AppResult<Vec<Ingredient>> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/recipes/{recipe_id}/ingredients"),
            Some(&ingredients),
        )
        .await
    }

    #[instrument(skip(self), fields(api_call = "fetch_client_settings"))]
    async fn fetch_client_settings(&self, client_id: &str) -> AppResult<ClientSettings> {
        self.send_json::<(), _>(
            reqwest::Method::GET,
            &format!("/clients/{client_id}/settings"),
            None,
        )
        .await
    }

    #[instrument(skip(self, preferences), fields(api_call = "store_preferences"))]
    async fn store_preferences(
        &self,
        settings_id: &str,
        preferences: &MealPlanPreferences,
    ) -> AppResult<MealPlanPreferences> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/client-settings/{settings_id}/meal-plan-preferences"),
            Some(preferences),
        )
        .await
    }

    #[instrument(skip(self, preferences), fields(api_call = "update_preferences"))]
    async fn update_preferences(
        &self,
        settings_id: &str,
        preferences: &MealPlanPreferences,
    ) -> AppResult<MealPlanPreferences> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/client-settings/{settings_id}/meal-plan-preferences"),
            Some(preferences),
        )
        .await
    }
}

/// In-memory backend mock assigning ids like the real API
///
/// Stores everything it is asked to persist so tests can assert on the
/// saved graph.
#[derive(Debug, Default)]
pub struct MockBackend {
    state: Mutex<MockBackendState>,
    fail_on_recipes: bool,
}

#[derive(Debug, Default)]
struct MockBackendState {
    plans: Vec<MealPlan>,
    recipes: Vec<Recipe>,
    meals: Vec<Meal>,
    settings: HashMap<String, ClientSettings>,
    preferences: HashMap<String, MealPlanPreferences>,
}

impl MockBackend {
    /// Empty mock backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that fails the recipe save, for exercising the persistence
    /// error path
    #[must_use]
    pub fn failing_on_recipes() -> Self {
        Self {
            state: Mutex::new(MockBackendState::default()),
            fail_on_recipes: true,
        }
    }

    /// Seed a client settings record
    #[must_use]
    pub fn with_client_settings(self, settings: ClientSettings) -> Self {
        {
            let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            state
                .settings
                .insert(settings.client_id.clone(), settings);
        }
        self
    }

    /// Plans saved so far
    #[must_use]
    pub fn saved_plans(&self) -> Vec<MealPlan> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .plans
            .clone()
    }

    /// Recipes saved so far
    #[must_use]
    pub fn saved_recipes(&self) -> Vec<Recipe> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .recipes
            .clone()
    }

    /// Meals saved so far
    #[must_use]
    pub fn saved_meals(&self) -> Vec<Meal> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .meals
            .clone()
    }

    fn assign_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl PlanStore for MockBackend {
    async fn add_meal_plan(&self, plan: &MealPlan) -> AppResult<MealPlan> {
        let mut stored = plan.clone();
        stored.id = Some(Self::assign_id());
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .plans
            .push(stored.clone());
        Ok(stored)
    }

    async fn update_meal_plan(&self, plan: &MealPlan) -> AppResult<MealPlan> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let existing = state
            .plans
            .iter_mut()
            .find(|candidate| candidate.id == plan.id)
            .ok_or_else(|| AppError::not_found("Meal plan"))?;
        *existing = plan.clone();
        Ok(plan.clone())
    }

    async fn add_meal_plan_recipes(
        &self,
        plan_id: &str,
        recipes: &[Recipe],
    ) -> AppResult<Vec<Recipe>> {
        if self.fail_on_recipes {
            return Err(AppError::external_service(
                SERVICE_NAME,
                "HTTP 500 for /meal-plans/recipes: simulated failure",
            ));
        }

        let stored: Vec<Recipe> = recipes
            .iter()
            .map(|recipe| {
                let mut stored = recipe.clone();
                stored.id = Some(Self::assign_id());
                stored.meal_plan_id = Some(plan_id.to_owned());
                stored
            })
            .collect();
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .recipes
            .extend(stored.clone());
        Ok(stored)
    }

    async fn add_meal_plan_meals(&self, plan_id: &str, meals: &[Meal]) -> AppResult<Vec<Meal>> {
        let stored: Vec<Meal> = meals
            .iter()
            .map(|meal| {
                let mut stored = meal.clone();
                stored.id = Some(Self::assign_id());
                stored.meal_plan_id = Some(plan_id.to_owned());
                stored
            })
            .collect();
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .meals
            .extend(stored.clone());
        Ok(stored)
    }

    async fn add_ingredients(
        &self,
        _recipe_id: &str,
        ingredients: &[Ingredient],
    ) -> AppResult<Vec<Ingredient>> {
        Ok(ingredients.to_vec())
    }

    async fn fetch_client_settings(&self, client_id: &str) -> AppResult<ClientSettings> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .settings
            .get(client_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Settings for client {client_id}")))
    }

    async fn store_preferences(
        &self,
        settings_id: &str,
        preferences: &MealPlanPreferences,
    ) -> AppResult<MealPlanPreferences> {
        let mut stored = preferences.clone();
        stored.id = Some(Self::assign_id());
        stored.client_settings_id = Some(settings_id.to_owned());
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .preferences
            .insert(settings_id.to_owned(), stored.clone());
        Ok(stored)
    }

    async fn update_preferences(
        &self,
        settings_id: &str,
        preferences: &MealPlanPreferences,
    ) -> AppResult<MealPlanPreferences> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if !state.preferences.contains_key(settings_id) {
            return Err(AppError::not_found("Stored meal plan preferences"));
        }
        state
            .preferences
            .insert(settings_id.to_owned(), preferences.clone());
        Ok(preferences.clone())
    }
}
