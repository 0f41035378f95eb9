// ABOUTME: Configuration management for the Savora meal planning service
// ABOUTME: Environment-based settings for external APIs, timeouts, and rate limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Configuration management
//!
//! All runtime configuration comes from environment variables; there are no
//! configuration files. [`environment::ServerConfig::from_env`] is the
//! single entry point.

/// Environment-based configuration management
pub mod environment;

pub use environment::{Environment, LogLevel, ServerConfig};
