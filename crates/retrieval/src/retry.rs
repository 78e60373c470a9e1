// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bounded retry with exponential backoff.

use async_trait::async_trait;
use bench_observatory_core::ResultBundle;
use std::time::Duration;
use tracing::warn;

use crate::{ResultFetcher, Result, RetrievalError};

/// Default number of fetch attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base delay between attempts; doubles after each failure (1s, 2s, 4s).
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Retry budget for a [`RetryingFetcher`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts before giving up. Clamped to at least 1.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles per further failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after the zero-based `attempt` has failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Decorates a [`ResultFetcher`] with a bounded retry budget.
///
/// All retrying happens inside this boundary; callers observe either the
/// first successful bundle or [`RetrievalError::RetriesExhausted`].
pub struct RetryingFetcher<F> {
    inner: F,
    policy: RetryPolicy,
}

impl<F> RetryingFetcher<F> {
    /// Wrap `inner` with the default [`RetryPolicy`].
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl<F: ResultFetcher> ResultFetcher for RetryingFetcher<F> {
    async fn fetch(&self, reference: &str) -> Result<ResultBundle> {
        let attempts = self.policy.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..attempts {
            match self.inner.fetch(reference).await {
                Ok(bundle) => return Ok(bundle),
                Err(err) => {
                    warn!(
                        reference,
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        error = %err,
                        "bundle fetch attempt failed"
                    );
                    last_error = Some(err);
                }
            }
            if attempt + 1 < attempts {
                tokio::time::sleep(self.policy.delay_for(attempt)).await;
            }
        }

        Err(RetrievalError::RetriesExhausted {
            attempts,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt recorded".to_string()),
        })
    }
}
