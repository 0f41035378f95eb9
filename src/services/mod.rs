// ABOUTME: Domain service layer for the Savora meal planning service
// ABOUTME: Orchestrates preference normalization, solving, fetching, and persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Domain services
//!
//! Services coordinate the pure planning transformations with the external
//! collaborators; they own the error-wrapping layers the callers rely on.

/// End-to-end meal plan generation
pub mod plan_generator;

pub use plan_generator::{GeneratePlanRequest, GeneratedPlan, PlanGenerator};
