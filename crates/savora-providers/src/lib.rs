// ABOUTME: External API clients for the Savora meal planning platform
// ABOUTME: Solver and recipe clients, shared HTTP client, and retry utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

#![deny(unsafe_code)]

//! External collaborator clients.
//!
//! This crate owns the outbound HTTP traffic of the platform: the meal-plan
//! solver (which turns normalized preferences into a per-day, per-section
//! recipe selection) and the recipe API (which resolves selection hrefs to
//! full recipe bodies). Both are reached through a shared pooled client and
//! wrapped in bounded retries with exponential backoff; there is no circuit
//! breaker - a request that exhausts its retries fails.

// Re-export savora-core modules so call sites can keep `use` paths short
pub use savora_core::errors;
pub use savora_core::models;

/// Shared HTTP client for outbound API calls
pub mod http_client;

/// Recipe API client resolving selection hrefs to recipe bodies
pub mod recipes;

/// Bounded-retry helper with exponential backoff
pub mod retry;

/// Meal-plan solver client
pub mod solver;

// Re-export key types for convenience
pub use http_client::{initialize_shared_client, shared_client};
pub use recipes::{MockRecipeClient, RecipeApiConfig, RecipeClient, RecipeSource};
pub use retry::{
    with_retry, RetryBackoffConfig, ENV_RETRY_BASE_DELAY_MS, ENV_RETRY_JITTER_FACTOR,
    ENV_RETRY_MAX_ATTEMPTS, ENV_RETRY_MAX_DELAY_MS,
};
pub use solver::{MockSolverClient, PlanSolver, SolverClient, SolverConfig};
