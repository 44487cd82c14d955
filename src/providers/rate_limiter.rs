// ABOUTME: Request budget enforcement for the provider's 100-requests-per-15-minutes read window
// ABOUTME: Serializes requests FIFO with minimum spacing and sleeps across window boundaries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::constants::limits;

/// Fixed-window request budget with FIFO admission.
///
/// The budget refills in full at each window boundary. `acquire()` grants
/// slots strictly in arrival order and enforces a minimum spacing between
/// consecutive grants; when the budget is spent it sleeps until the boundary
/// rather than failing. The returned [`RequestSlot`] holds the admission
/// lock until dropped, so at most one request is in flight at a time.
pub struct RateLimiter {
    state: Arc<Mutex<WindowState>>,
    capacity: u32,
    window: Duration,
    min_spacing: Duration,
}

#[derive(Debug)]
struct WindowState {
    window_start: Instant,
    used: u32,
    last_grant: Option<Instant>,
}

/// Admission token for one request.
///
/// Hold it across the HTTP call; dropping it admits the next waiter.
pub struct RequestSlot {
    _guard: OwnedMutexGuard<WindowState>,
}

impl RateLimiter {
    /// Create a limiter with an explicit budget
    #[must_use]
    pub fn new(capacity: u32, window: Duration, min_spacing: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(WindowState {
                window_start: Instant::now(),
                used: 0,
                last_grant: None,
            })),
            capacity,
            window,
            min_spacing,
        }
    }

    /// Limiter configured for the Strava read budget
    #[must_use]
    pub fn for_strava() -> Self {
        Self::new(
            limits::RATE_LIMIT_CAPACITY,
            limits::RATE_LIMIT_WINDOW,
            limits::MIN_REQUEST_SPACING,
        )
    }

    /// Wait for the next request slot.
    ///
    /// Never fails: an exhausted budget means sleeping until the window
    /// boundary, not an error. Waiters are served in arrival order.
    pub async fn acquire(&self) -> RequestSlot {
        let mut guard = self.state.clone().lock_owned().await;
        let now = Instant::now();

        // Roll the window if the boundary has passed since the last grant
        if now.duration_since(guard.window_start) >= self.window {
            guard.window_start = now;
            guard.used = 0;
        }

        if guard.used >= self.capacity {
            let wait = self
                .window
                .saturating_sub(now.duration_since(guard.window_start));
            warn!(
                wait_secs = wait.as_secs(),
                capacity = self.capacity,
                "Request budget exhausted, sleeping until window boundary"
            );
            tokio::time::sleep(wait).await;
            guard.window_start = Instant::now();
            guard.used = 0;
        }

        if let Some(last) = guard.last_grant {
            let since = last.elapsed();
            if since < self.min_spacing {
                tokio::time::sleep(self.min_spacing - since).await;
            }
        }

        guard.used += 1;
        guard.last_grant = Some(Instant::now());
        debug!(
            used = guard.used,
            capacity = self.capacity,
            "Request slot granted"
        );

        RequestSlot { _guard: guard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_minimum_spacing_between_grants() {
        let limiter = RateLimiter::new(100, Duration::from_secs(60), Duration::from_millis(50));

        let start = Instant::now();
        drop(limiter.acquire().await);
        drop(limiter.acquire().await);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_budget_refills_at_window_boundary() {
        let limiter = RateLimiter::new(2, Duration::from_millis(150), Duration::from_millis(1));

        let start = Instant::now();
        drop(limiter.acquire().await);
        drop(limiter.acquire().await);
        // Third grant has to wait out the remainder of the window
        drop(limiter.acquire().await);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_slot_serializes_requests() {
        let limiter = Arc::new(RateLimiter::new(
            100,
            Duration::from_secs(60),
            Duration::from_millis(1),
        ));

        let slot = limiter.acquire().await;
        let contender = Arc::clone(&limiter);
        let second =
            tokio::time::timeout(Duration::from_millis(20), contender.acquire()).await;
        assert!(second.is_err(), "second acquire should block while a slot is held");

        drop(slot);
        let second = tokio::time::timeout(Duration::from_millis(100), limiter.acquire()).await;
        assert!(second.is_ok());
    }
}
