// ABOUTME: Recipe API client resolving selection hrefs to full recipe bodies
// ABOUTME: Hits envelope DTOs, base-value seeding, RecipeSource trait, mock client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Recipe API client
//!
//! Selection assignments carry recipe URIs; this client resolves each one to
//! a full recipe body. The external API wraps results in a
//! `{hits: [{recipe}]}` envelope; the fetched values seed both the absolute
//! and the base (unscaled) nutrient fields of the domain [`Recipe`], since a
//! freshly fetched recipe is by definition unscaled.
//!
//! Fetches are sequential per request; there is no fan-out.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::instrument;

use savora_core::errors::{AppError, AppResult};
use savora_core::models::{Ingredient, NutrientMap, Recipe};

use crate::http_client::shared_client;
use crate::retry::{with_retry, RetryBackoffConfig};

/// Service name used in logs and error messages
const SERVICE_NAME: &str = "recipe API";

/// Recipe API client configuration
#[derive(Debug, Clone)]
pub struct RecipeApiConfig {
    /// Application id sent as a query parameter
    pub app_id: String,
    /// Application key sent as a query parameter
    pub app_key: String,
    /// Base URL for the recipe API
    pub base_url: String,
    /// Retry tuning for fetch calls
    pub retry: RetryBackoffConfig,
}

impl Default for RecipeApiConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_key: String::new(),
            base_url: "https://api.edamam.com/api/recipes/v2".to_owned(),
            retry: RetryBackoffConfig::default(),
        }
    }
}

/// External recipe body as returned inside the hits envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExternalRecipe {
    uri: String,
    label: String,
    #[serde(default)]
    ingredient_lines: Vec<String>,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(rename = "yield")]
    recipe_yield: f64,
    #[serde(default)]
    calories: f64,
    #[serde(default)]
    total_weight: f64,
    #[serde(default)]
    total_nutrients: NutrientMap,
    #[serde(default)]
    total_daily: NutrientMap,
    #[serde(default)]
    meal_type: Vec<String>,
}

impl ExternalRecipe {
    /// Convert into the domain recipe, seeding base values from the fetched
    /// (unscaled) absolutes
    fn into_recipe(self) -> Recipe {
        Recipe {
            id: None,
            meal_plan_id: None,
            client_id: None,
            uri: self.uri,
            label: self.label,
            ingredient_lines: self.ingredient_lines,
            ingredients: self.ingredients,
            recipe_yield: self.recipe_yield,
            base_yield: self.recipe_yield,
            calories: self.calories,
            total_weight: self.total_weight,
            base_total_weight: self.total_weight,
            base_total_nutrients: self.total_nutrients.clone(),
            base_total_daily: self.total_daily.clone(),
            total_nutrients: self.total_nutrients,
            total_daily: self.total_daily,
            meal_type: self.meal_type,
            time_scheduled: None,
            slot: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecipeHit {
    recipe: ExternalRecipe,
}

#[derive(Debug, Deserialize)]
struct RecipeHits {
    #[serde(default)]
    hits: Vec<RecipeHit>,
}

/// Seam for resolving recipe hrefs, mockable in tests
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Resolve one href to a full recipe body
    ///
    /// # Errors
    ///
    /// Returns [`AppError::not_found`] when the API knows no recipe for the
    /// href, or an external-service error for transport failures.
    async fn fetch_by_uri(&self, href: &str) -> AppResult<Recipe>;

    /// Resolve several hrefs sequentially, failing on the first error
    ///
    /// # Errors
    ///
    /// Propagates the first per-href failure.
    async fn fetch_all(&self, hrefs: &[String]) -> AppResult<Vec<Recipe>> {
        let mut recipes = Vec::with_capacity(hrefs.len());
        for href in hrefs {
            recipes.push(self.fetch_by_uri(href).await?);
        }
        Ok(recipes)
    }
}

/// HTTP client for the external recipe API
pub struct RecipeClient {
    config: RecipeApiConfig,
}

impl RecipeClient {
    /// Create a recipe client
    #[must_use]
    pub fn new(config: RecipeApiConfig) -> Self {
        Self { config }
    }

    async fn fetch_once(&self, href: &str) -> AppResult<Recipe> {
        let url = format!("{}/by-uri", self.config.base_url);

        let response = shared_client()
            .get(&url)
            .query(&[
                ("type", "public"),
                ("uri", href),
                ("app_id", &self.config.app_id),
                ("app_key", &self.config.app_key),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = format!("HTTP {status}: {body}");
            return if status.is_server_error() {
                Err(AppError::external_unavailable(SERVICE_NAME, detail))
            } else {
                Err(AppError::external_service(SERVICE_NAME, detail))
            };
        }

        let parsed: RecipeHits = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;

        parsed
            .hits
            .into_iter()
            .next()
            .map(|hit| hit.recipe.into_recipe())
            .ok_or_else(|| AppError::not_found(format!("Recipe for uri {href}")))
    }
}

#[async_trait]
impl RecipeSource for RecipeClient {
    #[instrument(skip(self), fields(api_call = "fetch_by_uri"))]
    async fn fetch_by_uri(&self, href: &str) -> AppResult<Recipe> {
        if href.is_empty() {
            return Err(AppError::invalid_input("Recipe href cannot be empty"));
        }

        with_retry("recipes.fetch_by_uri", &self.config.retry, || {
            self.fetch_once(href)
        })
        .await
    }
}

/// Mock recipe source for tests: serves recipes from an in-memory map
#[derive(Debug, Default)]
pub struct MockRecipeClient {
    recipes: HashMap<String, Recipe>,
}

impl MockRecipeClient {
    /// Empty mock; add recipes with [`Self::with_recipe`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recipe served for the given href
    #[must_use]
    pub fn with_recipe(mut self, href: impl Into<String>, recipe: Recipe) -> Self {
        self.recipes.insert(href.into(), recipe);
        self
    }
}

#[async_trait]
impl RecipeSource for MockRecipeClient {
    async fn fetch_by_uri(&self, href: &str) -> AppResult<Recipe> {
        self.recipes
            .get(href)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Recipe for uri {href}")))
    }
}
