// ABOUTME: Core data models and types for the Savora meal planning platform
// ABOUTME: Re-exports the filter tree, preferences, plan, recipe, and meal structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! # Data Models
//!
//! This module contains the core data structures used throughout the Savora
//! platform: the recursive preference filter tree sent to the external
//! meal-plan solver, the preferences aggregate owned by a client's settings,
//! and the plan / recipe / meal entity graph persisted through the backend
//! API.
//!
//! ## Design Principles
//!
//! - **Wire Faithful**: serde shapes match the external solver and backend
//!   APIs exactly; absent optional fields stay absent on re-serialization
//! - **Extensible**: Optional fields accommodate partial records
//! - **Type Safe**: Strong typing prevents common data handling errors

// Domain modules
mod client_settings;
mod filter;
mod meal;
mod meal_plan;
mod preferences;
mod recipe;

// Filter tree
pub use filter::{LabelCategory, MealFilter, WhenClause};

// Preferences aggregate
pub use preferences::{MealPlanPreferences, MealSection, NutrientConstraints, NutrientRange, PlanSection};

// Plan and selection
pub use meal_plan::{AssignmentLinks, Link, MealPlan, SectionAssignment, SelectionDay};

// Recipe domain
pub use recipe::{Ingredient, Nutrient, NutrientMap, Recipe};

// Meal domain
pub use meal::{weekday_name, Meal, MealSlot, MealType};

// Client settings
pub use client_settings::ClientSettings;
