// ABOUTME: Application constants organized by domain
// ABOUTME: Groups OAuth endpoints, rate-limit budgets, env var names, and storage layout defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped into logical domains rather than a single flat file.
//! Numbers that encode provider policy (request budget, page size, refresh
//! threshold) live here so the components that enforce them stay free of
//! magic literals.

/// OAuth endpoints and token policy
pub mod oauth {
    /// Strava API base URL
    pub const STRAVA_API_BASE: &str = "https://www.strava.com/api/v3";

    /// Strava authorization (consent) endpoint
    pub const STRAVA_AUTH_URL: &str = "https://www.strava.com/oauth/authorize";

    /// Strava token endpoint, used for both the authorization-code and
    /// refresh-token grants
    pub const STRAVA_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

    /// Scope required to read the full activity history
    pub const STRAVA_DEFAULT_SCOPES: &str = "activity:read_all";

    /// Remaining lifetime under which an access token is refreshed before use
    pub const TOKEN_REFRESH_THRESHOLD_SECS: i64 = 3600;
}

/// Request budget, retry, and pagination limits
pub mod limits {
    use std::time::Duration;

    /// Read requests permitted per rate-limit window
    pub const RATE_LIMIT_CAPACITY: u32 = 100;

    /// Rolling window after which the request budget refills in full
    pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

    /// Minimum spacing between consecutive requests, a safety margin on top
    /// of the nominal budget
    pub const MIN_REQUEST_SPACING: Duration = Duration::from_millis(200);

    /// Total attempts for a request that keeps failing transiently
    pub const MAX_RETRY_ATTEMPTS: u32 = 3;

    /// Backoff before the second attempt; doubles for each attempt after
    pub const INITIAL_RETRY_BACKOFF: Duration = Duration::from_secs(1);

    /// Activities requested per page during sync
    pub const ACTIVITIES_PER_PAGE: usize = 200;

    /// Assumed `Retry-After` when a 429 response omits the header
    pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

    /// End-to-end HTTP request timeout
    pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

    /// TCP connect timeout
    pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Environment variable names read at process start
pub mod env_vars {
    /// OAuth application client id (required)
    pub const STRAVA_CLIENT_ID: &str = "STRAVA_CLIENT_ID";

    /// OAuth application client secret (required)
    pub const STRAVA_CLIENT_SECRET: &str = "STRAVA_CLIENT_SECRET";

    /// Root directory for all persisted state (optional)
    pub const STRAVA_DATA_DIR: &str = "STRAVA_DATA_DIR";

    /// Log output format selector: json, pretty, or compact
    pub const LOG_FORMAT: &str = "LOG_FORMAT";

    /// Standard tracing filter directive
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// On-disk layout under the data directory
pub mod storage {
    /// Default data directory when `STRAVA_DATA_DIR` is unset
    pub const DEFAULT_DATA_DIR: &str = "./data";

    /// Credential file name
    pub const TOKENS_FILE: &str = "tokens.json";

    /// Sync cursor file name
    pub const SYNC_STATE_FILE: &str = "sync-state.json";

    /// Directory of per-activity JSON records
    pub const ACTIVITIES_DIR: &str = "activities";

    /// Directory of derived analytics artifacts
    pub const STATS_DIR: &str = "stats";
}

/// Analytics artifact file names; these are a published contract for the
/// rendering layer and must not change
pub mod artifacts {
    /// Weekly distance rollup
    pub const WEEKLY_DISTANCE_FILE: &str = "weekly-distance.json";

    /// Cumulative all-time totals
    pub const ALL_TIME_TOTALS_FILE: &str = "all-time-totals.json";

    /// Per-month rollup
    pub const MONTHLY_STATS_FILE: &str = "monthly-stats.json";

    /// Per-year rollup
    pub const YEARLY_STATS_FILE: &str = "yearly-stats.json";

    /// Generation metadata and artifact listing
    pub const METADATA_FILE: &str = "metadata.json";

    /// Monthly volume compared across recent years
    pub const YEAR_OVER_YEAR_FILE: &str = "year-over-year.json";

    /// Run distribution over time-of-day buckets
    pub const TIME_OF_DAY_FILE: &str = "time-of-day.json";

    /// Monthly volume per recent year, flattened
    pub const SEASONAL_TRENDS_FILE: &str = "seasonal-trends.json";

    /// Daily streak and weekly consistency summary
    pub const STREAKS_FILE: &str = "streaks.json";
}
