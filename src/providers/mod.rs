// ABOUTME: Rate-limited provider access for fetching activities from the Strava API
// ABOUTME: Defines the ActivityProvider seam plus the request budget and retry machinery
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::errors::Result;
use crate::models::Activity;
use async_trait::async_trait;

pub mod rate_limiter;
pub mod retry;
pub mod strava;

pub use rate_limiter::{RateLimiter, RequestSlot};
pub use retry::RetryPolicy;
pub use strava::StravaProvider;

/// Paginated activity source the sync engine runs against.
///
/// The engine never talks HTTP directly; tests drive it with an in-memory
/// implementation of this trait.
#[async_trait]
pub trait ActivityProvider: Send + Sync {
    /// Fetch one page of activities.
    ///
    /// `after` filters to activities starting strictly after the given Unix
    /// timestamp; `None` fetches from the beginning of history. Pages are
    /// 1-indexed. An empty page means no more data.
    async fn get_activities(
        &self,
        after: Option<i64>,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Activity>>;

    /// Stable provider name used in logs
    fn provider_name(&self) -> &'static str;
}
