// ABOUTME: Bounded-retry helper with exponential backoff and jitter
// ABOUTME: Retries transient external-service failures a fixed number of times
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Bounded retries for outbound calls
//!
//! Every outbound API call is wrapped in a fixed-attempt retry with
//! exponential backoff and jitter. Only errors whose code reports as
//! retryable (transient external-service failures) are retried; validation
//! and configuration errors fail immediately. There is deliberately no
//! circuit breaker: a request that exhausts its attempts fails.

use rand::Rng;
use std::env;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use savora_core::errors::AppResult;

/// Environment variable overriding the maximum attempt count
pub const ENV_RETRY_MAX_ATTEMPTS: &str = "SAVORA_RETRY_MAX_ATTEMPTS";
/// Environment variable overriding the base backoff delay in milliseconds
pub const ENV_RETRY_BASE_DELAY_MS: &str = "SAVORA_RETRY_BASE_DELAY_MS";
/// Environment variable overriding the backoff delay ceiling in milliseconds
pub const ENV_RETRY_MAX_DELAY_MS: &str = "SAVORA_RETRY_MAX_DELAY_MS";
/// Environment variable overriding the jitter factor (0.0 to 1.0)
pub const ENV_RETRY_JITTER_FACTOR: &str = "SAVORA_RETRY_JITTER_FACTOR";

/// Backoff tuning for [`with_retry`]
#[derive(Debug, Clone)]
pub struct RetryBackoffConfig {
    /// Total attempts including the first (1 disables retries)
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per attempt after that
    pub base_delay_ms: u64,
    /// Ceiling applied to the computed delay
    pub max_delay_ms: u64,
    /// Relative jitter applied to each delay (0.2 = +/-20%)
    pub jitter_factor: f64,
}

impl Default for RetryBackoffConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
            jitter_factor: 0.2,
        }
    }
}

impl RetryBackoffConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_attempts: parse_env(ENV_RETRY_MAX_ATTEMPTS, defaults.max_attempts),
            base_delay_ms: parse_env(ENV_RETRY_BASE_DELAY_MS, defaults.base_delay_ms),
            max_delay_ms: parse_env(ENV_RETRY_MAX_DELAY_MS, defaults.max_delay_ms),
            jitter_factor: parse_env(ENV_RETRY_JITTER_FACTOR, defaults.jitter_factor),
        }
    }

    /// Backoff delay before the attempt following `completed_attempts`
    #[must_use]
    pub fn delay_for_attempt(&self, completed_attempts: u32) -> Duration {
        let exponent = completed_attempts.saturating_sub(1).min(16);
        let raw = self
            .base_delay_ms
            .saturating_mul(1_u64 << exponent)
            .min(self.max_delay_ms);

        let jittered = if self.jitter_factor > 0.0 {
            let spread = rand::thread_rng().gen_range(-self.jitter_factor..=self.jitter_factor);
            (raw as f64 * (1.0 + spread)).max(0.0) as u64
        } else {
            raw
        };

        Duration::from_millis(jittered)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Run `operation` with bounded retries on transient failures
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or immediately for
/// errors that are not retryable.
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: &RetryBackoffConfig,
    mut operation: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempt < config.max_attempts => {
                let delay = config.delay_for_attempt(attempt);
                warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "transient failure, backing off before retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
