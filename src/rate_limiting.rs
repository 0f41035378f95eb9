// ABOUTME: Best-effort in-memory rate limiting for plan generation requests
// ABOUTME: Fixed-window per-client counters over a concurrent map
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! # Request Rate Limiting
//!
//! Fixed-window, per-client rate limiting for the plan-generation flow.
//!
//! State lives in an in-process concurrent map: it is best-effort, not
//! durable, and resets on process restart. Because each process keeps its
//! own counters, the limiter is NOT safe across multiple instances.
//! TODO: back this with the shared store once the backend exposes one.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::env;
use std::time::{Duration, Instant};

use savora_core::constants::{defaults, env_config};
use savora_core::errors::{AppError, AppResult};

/// Rate limit tuning
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window per client
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: defaults::RATE_LIMIT_MAX_REQUESTS,
            window: Duration::from_secs(defaults::RATE_LIMIT_WINDOW_SECS),
        }
    }
}

impl RateLimitConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable
    #[must_use]
    pub fn from_env() -> Self {
        let defaults_config = Self::default();

        let max_requests = env::var(env_config::RATE_LIMIT_MAX_REQUESTS)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults_config.max_requests);
        let window_secs = env::var(env_config::RATE_LIMIT_WINDOW_SECS)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| defaults_config.window.as_secs());

        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Rate limit standing for one client at one point in time
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitStatus {
    /// Whether the next request would be rejected
    pub is_rate_limited: bool,
    /// Maximum requests allowed in the window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// When the current window resets
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug)]
struct WindowState {
    window_start: Instant,
    count: u32,
}

/// Fixed-window in-memory rate limiter keyed by client id
#[derive(Debug)]
pub struct RequestRateLimiter {
    windows: DashMap<String, WindowState>,
    config: RateLimitConfig,
}

impl RequestRateLimiter {
    /// Create a limiter with the given tuning
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            config,
        }
    }

    /// Record one request for `client_id`, rejecting it once the window is
    /// exhausted
    ///
    /// # Errors
    ///
    /// Returns [`AppError::rate_limit_exceeded`] when the client has used up
    /// its window.
    pub fn check(&self, client_id: &str) -> AppResult<()> {
        let now = Instant::now();
        let mut entry = self
            .windows
            .entry(client_id.to_owned())
            .or_insert_with(|| WindowState {
                window_start: now,
                count: 0,
            });

        if now.duration_since(entry.window_start) >= self.config.window {
            entry.window_start = now;
            entry.count = 0;
        }

        if entry.count >= self.config.max_requests {
            let reset_at = Utc::now()
                + ChronoDuration::from_std(
                    self.config
                        .window
                        .saturating_sub(now.duration_since(entry.window_start)),
                )
                .unwrap_or_else(|_| ChronoDuration::seconds(0));
            return Err(
                AppError::rate_limit_exceeded(self.config.max_requests, reset_at)
                    .with_client_id(client_id),
            );
        }

        entry.count += 1;
        Ok(())
    }

    /// Current standing for `client_id` without consuming a request
    #[must_use]
    pub fn status(&self, client_id: &str) -> RateLimitStatus {
        let now = Instant::now();
        let (count, window_start) = self.windows.get(client_id).map_or((0, now), |entry| {
            if now.duration_since(entry.window_start) >= self.config.window {
                (0, now)
            } else {
                (entry.count, entry.window_start)
            }
        });

        let remaining = self.config.max_requests.saturating_sub(count);
        let reset_at = Utc::now()
            + ChronoDuration::from_std(
                self.config
                    .window
                    .saturating_sub(now.duration_since(window_start)),
            )
            .unwrap_or_else(|_| ChronoDuration::seconds(0));

        RateLimitStatus {
            is_rate_limited: remaining == 0,
            limit: self.config.max_requests,
            remaining,
            reset_at,
        }
    }

    /// Drop all counters (useful for tests)
    pub fn reset(&self) {
        self.windows.clear();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn limiter(max_requests: u32) -> RequestRateLimiter {
        RequestRateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_secs(60),
        })
    }

    #[test]
    fn test_allows_up_to_limit_then_rejects() {
        let limiter = limiter(2);

        assert!(limiter.check("client-1").is_ok());
        assert!(limiter.check("client-1").is_ok());
        assert!(limiter.check("client-1").is_err());
    }

    #[test]
    fn test_clients_are_isolated() {
        let limiter = limiter(1);

        assert!(limiter.check("client-1").is_ok());
        assert!(limiter.check("client-2").is_ok());
        assert!(limiter.check("client-1").is_err());
    }

    #[test]
    fn test_status_reports_remaining() {
        let limiter = limiter(3);
        limiter.check("client-1").unwrap();

        let status = limiter.status("client-1");
        assert_eq!(status.limit, 3);
        assert_eq!(status.remaining, 2);
        assert!(!status.is_rate_limited);
    }

    #[test]
    fn test_reset_clears_counters() {
        let limiter = limiter(1);
        limiter.check("client-1").unwrap();
        limiter.reset();

        assert!(limiter.check("client-1").is_ok());
    }
}
