// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants organized by domain for the Savora meal planning platform
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Constants module
//!
//! This module organizes application constants by domain for better
//! maintainability. Constants are grouped into logical domains rather than
//! being in a single large file.

/// Nutrient codes used by the external recipe API and in nutrient maps
pub mod nutrients {
    /// Energy in kilocalories
    pub const ENERC_KCAL: &str = "ENERC_KCAL";
    /// Protein in grams
    pub const PROCNT: &str = "PROCNT";
    /// Total fat in grams
    pub const FAT: &str = "FAT";
    /// Carbohydrates in grams
    pub const CHOCDF: &str = "CHOCDF";
    /// Fiber in grams
    pub const FIBTG: &str = "FIBTG";
    /// Sugar in grams
    pub const SUGAR: &str = "SUGAR";
    /// Sodium in milligrams
    pub const NA: &str = "NA";
    /// Cholesterol in milligrams
    pub const CHOLE: &str = "CHOLE";
}

/// Meal section (slot) names used in plans and selections
pub mod sections {
    /// Breakfast slot
    pub const BREAKFAST: &str = "Breakfast";
    /// Lunch slot
    pub const LUNCH: &str = "Lunch";
    /// Dinner slot
    pub const DINNER: &str = "Dinner";
    /// Snack slot
    pub const SNACK: &str = "Snack";
}

/// User-facing message strings
pub mod messages {
    /// Surfaced when plan generation fails for any reason
    pub const ERROR_GENERATING_MEALS: &str = "Error generating meals.";
    /// Wraps persistence failures during the multi-entity plan save
    pub const ERROR_SAVING_PLAN_ENTITIES: &str =
        "Error occurred saving meal plan recipes and meals";
}

/// Environment variable names for runtime configuration
pub mod env_config {
    /// Meal-plan solver application id
    pub const SOLVER_APP_ID: &str = "SAVORA_SOLVER_APP_ID";
    /// Meal-plan solver application key
    pub const SOLVER_APP_KEY: &str = "SAVORA_SOLVER_APP_KEY";
    /// Meal-plan solver base URL override
    pub const SOLVER_BASE_URL: &str = "SAVORA_SOLVER_BASE_URL";
    /// Recipe API application id
    pub const RECIPE_APP_ID: &str = "SAVORA_RECIPE_APP_ID";
    /// Recipe API application key
    pub const RECIPE_APP_KEY: &str = "SAVORA_RECIPE_APP_KEY";
    /// Recipe API base URL override
    pub const RECIPE_BASE_URL: &str = "SAVORA_RECIPE_BASE_URL";
    /// Backend persistence API base URL
    pub const BACKEND_BASE_URL: &str = "SAVORA_BACKEND_BASE_URL";
    /// Bearer token for the backend persistence API
    pub const BACKEND_AUTH_TOKEN: &str = "SAVORA_BACKEND_AUTH_TOKEN";
    /// Outbound HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "SAVORA_HTTP_TIMEOUT_SECS";
    /// Outbound HTTP connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "SAVORA_HTTP_CONNECT_TIMEOUT_SECS";
    /// Per-client plan generation rate limit (requests per window)
    pub const RATE_LIMIT_MAX_REQUESTS: &str = "SAVORA_RATE_LIMIT_MAX_REQUESTS";
    /// Rate limit window in seconds
    pub const RATE_LIMIT_WINDOW_SECS: &str = "SAVORA_RATE_LIMIT_WINDOW_SECS";
}

/// Default values for tunable runtime settings
pub mod defaults {
    /// Default outbound HTTP request timeout
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// Default outbound HTTP connect timeout
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Default plan length in days
    pub const PLAN_SIZE_DAYS: u32 = 7;
    /// Default per-client plan generation requests per window
    pub const RATE_LIMIT_MAX_REQUESTS: u32 = 10;
    /// Default rate limit window in seconds
    pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;
}

/// Service identity strings for logging
pub mod service_names {
    /// Canonical service name for structured logs
    pub const SAVORA_PLANNER: &str = "savora-planner";
}
