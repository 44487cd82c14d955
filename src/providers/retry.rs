// ABOUTME: Bounded retry for transient provider failures with exponential backoff
// ABOUTME: Classifies by error variant; 4xx and 429 responses are never re-attempted
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::limits;
use crate::errors::Result;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Configuration for retry behavior.
///
/// Only errors for which [`crate::errors::Error::is_retryable`] returns true
/// are re-attempted; everything else propagates on the first failure.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles for each one after
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: limits::MAX_RETRY_ATTEMPTS,
            initial_backoff: limits::INITIAL_RETRY_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Backoff to sleep after the given failed attempt (1-indexed)
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2_u32.pow(attempt.saturating_sub(1))
    }

    /// Run `operation`, re-attempting transient failures until the attempt
    /// budget is spent. The last error propagates unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable error immediately, or the final
    /// error once all attempts are exhausted.
    pub async fn execute<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    let backoff = self.backoff_for(attempt);
                    warn!(
                        error = %e,
                        backoff_ms = backoff.as_millis() as u64,
                        "{operation_name} failed - retry {attempt}/{max} pending",
                        max = self.max_attempts,
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
