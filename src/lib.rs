// ABOUTME: Main library entry point for the Savora meal planning service
// ABOUTME: Wires configuration, logging, rate limiting, persistence, and plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

#![deny(unsafe_code)]

//! # Savora Planner
//!
//! The meal-planning service core: it normalizes a client's preference
//! filter tree into the external solver's token convention, requests a
//! per-day / per-section recipe selection, fetches the chosen recipes,
//! derives single-serving meals from them, and persists the resulting
//! plan / recipe / meal graph through the backend REST API.
//!
//! ## Architecture
//!
//! - **`savora-core`**: shared error handling, constants, and data models
//! - **`savora-planning`**: pure transformations (label normalization,
//!   nutrient scaling, selection reconciliation, preference views)
//! - **`savora-providers`**: external solver and recipe API clients
//! - **this crate**: configuration, logging, rate limiting, the backend
//!   persistence client, and the plan-generation orchestration service
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use savora_planner::config::environment::ServerConfig;
//! use savora_core::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Savora planner configured for {}", config.backend_base_url);
//!     Ok(())
//! }
//! ```

/// Backend persistence API client and the `PlanStore` seam
pub mod backend;

/// Configuration management
pub mod config;

/// Production logging and structured output
pub mod logging;

/// Best-effort in-memory request rate limiting
pub mod rate_limiting;

/// Domain service layer orchestrating plan generation
pub mod services;

// Re-export the foundational modules so binaries and tests reach everything
// through one dependency
pub use savora_core::{constants, errors, models};
pub use savora_planning as planning;
pub use savora_providers as providers;
