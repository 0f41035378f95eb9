// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses env vars into typed solver, recipe, backend, and rate limit settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Environment-based configuration management for production deployment

use serde::{Deserialize, Serialize};
use std::env;

use savora_core::constants::{defaults, env_config};
use savora_core::errors::{AppError, AppResult};
use savora_providers::recipes::RecipeApiConfig;
use savora_providers::retry::RetryBackoffConfig;
use savora_providers::solver::SolverConfig;

use crate::backend::BackendConfig;
use crate::rate_limiting::RateLimitConfig;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational logging
    #[default]
    Info,
    /// Debug logging
    Debug,
    /// Trace logging
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type controlling logging defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated testing
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete runtime configuration for the planner service
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Application log level
    pub log_level: LogLevel,
    /// Meal-plan solver application id
    pub solver_app_id: String,
    /// Meal-plan solver application key
    pub solver_app_key: String,
    /// Meal-plan solver base URL
    pub solver_base_url: Option<String>,
    /// Recipe API application id
    pub recipe_app_id: String,
    /// Recipe API application key
    pub recipe_app_key: String,
    /// Recipe API base URL
    pub recipe_base_url: Option<String>,
    /// Backend persistence API base URL
    pub backend_base_url: String,
    /// Bearer token for the backend persistence API
    pub backend_auth_token: Option<String>,
    /// Outbound HTTP request timeout in seconds
    pub http_timeout_secs: u64,
    /// Outbound HTTP connect timeout in seconds
    pub http_connect_timeout_secs: u64,
    /// Per-client plan generation rate limit
    pub rate_limit: RateLimitConfig,
    /// Retry tuning shared by the outbound clients
    pub retry: RetryBackoffConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a required credential or URL is
    /// missing.
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );
        let log_level =
            LogLevel::from_str_or_default(&env::var("RUST_LOG").unwrap_or_default());

        Ok(Self {
            environment,
            log_level,
            solver_app_id: require(env_config::SOLVER_APP_ID)?,
            solver_app_key: require(env_config::SOLVER_APP_KEY)?,
            solver_base_url: env::var(env_config::SOLVER_BASE_URL).ok(),
            recipe_app_id: require(env_config::RECIPE_APP_ID)?,
            recipe_app_key: require(env_config::RECIPE_APP_KEY)?,
            recipe_base_url: env::var(env_config::RECIPE_BASE_URL).ok(),
            backend_base_url: require(env_config::BACKEND_BASE_URL)?,
            backend_auth_token: env::var(env_config::BACKEND_AUTH_TOKEN).ok(),
            http_timeout_secs: parse_env(
                env_config::HTTP_TIMEOUT_SECS,
                defaults::HTTP_TIMEOUT_SECS,
            ),
            http_connect_timeout_secs: parse_env(
                env_config::HTTP_CONNECT_TIMEOUT_SECS,
                defaults::HTTP_CONNECT_TIMEOUT_SECS,
            ),
            rate_limit: RateLimitConfig::from_env(),
            retry: RetryBackoffConfig::from_env(),
        })
    }

    /// Solver client configuration derived from this config
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig {
            app_id: self.solver_app_id.clone(),
            app_key: self.solver_app_key.clone(),
            retry: self.retry.clone(),
            ..SolverConfig::default()
        };
        if let Some(base_url) = &self.solver_base_url {
            config.base_url.clone_from(base_url);
        }
        config
    }

    /// Recipe client configuration derived from this config
    #[must_use]
    pub fn recipe_config(&self) -> RecipeApiConfig {
        let mut config = RecipeApiConfig {
            app_id: self.recipe_app_id.clone(),
            app_key: self.recipe_app_key.clone(),
            retry: self.retry.clone(),
            ..RecipeApiConfig::default()
        };
        if let Some(base_url) = &self.recipe_base_url {
            config.base_url.clone_from(base_url);
        }
        config
    }

    /// Backend client configuration derived from this config
    #[must_use]
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.backend_base_url.clone(),
            auth_token: self.backend_auth_token.clone(),
        }
    }
}

fn require(name: &'static str) -> AppResult<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            AppError::new(
                savora_core::errors::ErrorCode::ConfigMissing,
                format!("Required environment variable {name} is not set"),
            )
        })
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default(""),
            Environment::Development
        );
        assert!(Environment::Production.is_production());
    }
}
