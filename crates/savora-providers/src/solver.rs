// ABOUTME: Meal-plan solver API client turning preferences into a recipe selection
// ABOUTME: HTTP Basic auth, select request/response DTOs, PlanSolver trait, mock client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Meal-plan solver client
//!
//! The solver receives `{size, plan}` - the plan section already normalized
//! to the solver's token convention - and returns one selection entry per
//! day, each mapping section names to an assigned recipe URI. Constraint
//! solving happens entirely on the solver's side; this client only moves
//! the shapes across the wire.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use savora_core::errors::{AppError, AppResult};
use savora_core::models::{PlanSection, SelectionDay};

use crate::http_client::shared_client;
use crate::retry::{with_retry, RetryBackoffConfig};

/// Service name used in logs and error messages
const SERVICE_NAME: &str = "meal-plan solver";

/// Solver API client configuration
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Application id, also the Basic auth username
    pub app_id: String,
    /// Application key, the Basic auth password
    pub app_key: String,
    /// Base URL for the solver API
    pub base_url: String,
    /// Retry tuning for select calls
    pub retry: RetryBackoffConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_key: String::new(),
            base_url: "https://api.edamam.com/api/meal-planner/v1".to_owned(),
            retry: RetryBackoffConfig::default(),
        }
    }
}

/// Request body of a select call
#[derive(Debug, Serialize)]
struct SelectRequest<'a> {
    size: u32,
    plan: &'a PlanSection,
}

/// Response body of a select call
#[derive(Debug, Deserialize)]
struct SelectResponse {
    #[serde(default)]
    #[allow(dead_code)] // Part of the solver's wire contract; not consumed yet
    status: Option<String>,
    #[serde(default)]
    selection: Vec<SelectionDay>,
}

/// Seam for requesting a plan selection, mockable in tests
#[async_trait]
pub trait PlanSolver: Send + Sync {
    /// Request a selection for `size` days under the given plan constraints
    ///
    /// # Errors
    ///
    /// Returns an error for invalid input, authentication failures, or
    /// solver-side errors.
    async fn select(&self, size: u32, plan: &PlanSection) -> AppResult<Vec<SelectionDay>>;
}

/// HTTP client for the external meal-plan solver
pub struct SolverClient {
    config: SolverConfig,
}

impl SolverClient {
    /// Create a solver client
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    async fn select_once(&self, size: u32, plan: &PlanSection) -> AppResult<Vec<SelectionDay>> {
        let url = format!("{}/{}/select", self.config.base_url, self.config.app_id);

        let response = shared_client()
            .post(&url)
            .basic_auth(&self.config.app_id, Some(&self.config.app_key))
            .json(&SelectRequest { size, plan })
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed: SelectResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;

        debug!(days = parsed.selection.len(), "solver returned selection");
        Ok(parsed.selection)
    }
}

fn status_error(status: reqwest::StatusCode, body: &str) -> AppError {
    let detail = format!("HTTP {status}: {body}");
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        AppError::new(
            savora_core::errors::ErrorCode::ExternalAuthFailed,
            format!("{SERVICE_NAME}: {detail}"),
        )
    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        AppError::new(
            savora_core::errors::ErrorCode::ExternalRateLimited,
            format!("{SERVICE_NAME}: {detail}"),
        )
    } else if status.is_server_error() {
        AppError::external_unavailable(SERVICE_NAME, detail)
    } else {
        AppError::external_service(SERVICE_NAME, detail)
    }
}

#[async_trait]
impl PlanSolver for SolverClient {
    #[instrument(skip(self, plan), fields(api_call = "select"))]
    async fn select(&self, size: u32, plan: &PlanSection) -> AppResult<Vec<SelectionDay>> {
        if size == 0 {
            return Err(AppError::invalid_input("Plan size must be at least 1 day"));
        }
        if self.config.app_id.is_empty() || self.config.app_key.is_empty() {
            return Err(AppError::config("Solver credentials are not configured"));
        }

        with_retry("solver.select", &self.config.retry, || {
            self.select_once(size, plan)
        })
        .await
    }
}

/// Mock solver for tests: returns a canned selection without network calls
#[derive(Debug, Default)]
pub struct MockSolverClient {
    selection: Vec<SelectionDay>,
    fail_with: Option<String>,
}

impl MockSolverClient {
    /// Mock that answers every select call with the given selection
    #[must_use]
    pub fn returning(selection: Vec<SelectionDay>) -> Self {
        Self {
            selection,
            fail_with: None,
        }
    }

    /// Mock that fails every select call with an external-service error
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            selection: Vec::new(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl PlanSolver for MockSolverClient {
    async fn select(&self, size: u32, _plan: &PlanSection) -> AppResult<Vec<SelectionDay>> {
        if size == 0 {
            return Err(AppError::invalid_input("Plan size must be at least 1 day"));
        }
        if let Some(message) = &self.fail_with {
            return Err(AppError::external_service(SERVICE_NAME, message.clone()));
        }
        Ok(self.selection.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use savora_core::models::SectionAssignment;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_select_rejects_zero_size() {
        let client = SolverClient::new(SolverConfig::default());
        let result = client.select(0, &PlanSection::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_select_requires_credentials() {
        let client = SolverClient::new(SolverConfig::default());
        let result = client.select(3, &PlanSection::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_returns_canned_selection() {
        let mut sections = BTreeMap::new();
        sections.insert(
            "Breakfast".to_owned(),
            SectionAssignment::new("http://example.test/recipes/v2/abc", None),
        );
        let mock = MockSolverClient::returning(vec![SelectionDay { sections }]);

        let selection = mock.select(1, &PlanSection::default()).await.unwrap();
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_select_request_wire_shape() {
        let plan = PlanSection::default();
        let request = SelectRequest { size: 7, plan: &plan };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["size"], 7);
        assert!(json.get("plan").is_some());
    }
}
