// ABOUTME: Core types and constants for the Savora meal planning platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

#![deny(unsafe_code)]

//! # Savora Core
//!
//! Foundation crate providing shared types and constants for the Savora meal
//! planning platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Domain models (filter tree, preferences, plans, recipes, meals)

/// Unified error handling system with standard error codes and HTTP status mapping
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (filter tree, preferences, meal plan, recipe, meal)
pub mod models;
