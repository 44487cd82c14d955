// ABOUTME: Analytics over the synced activity history
// ABOUTME: Shared run loader plus streak, consistency, aggregate, and advanced artifact modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analytics
//!
//! Everything here is derived state: each computation reads the activity
//! files written by sync, filters to runs, and recomputes from scratch. No
//! analytics output ever feeds back into sync.
//!
//! Calendar arithmetic is UTC throughout. See [`dates`] for the bucketing
//! rules and [`streaks`] / [`consistency`] for the streak definitions.

pub mod advanced;
pub mod aggregates;
pub mod consistency;
pub mod dates;
pub mod streaks;

pub use advanced::{compute_advanced_stats, StreakArtifact, WeeklyConsistencyArtifact};
pub use aggregates::{compute_stats, AllTimeTotals, PeriodStats, StatsMetadata, WeeklyStats};
pub use consistency::{calculate_weekly_consistency, WeeklyConsistencyResult};
pub use streaks::{calculate_daily_streaks, StreakResult};

use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::models::Activity;
use crate::storage;

/// Load every run activity from the activities directory, sorted by start
/// time ascending.
///
/// Non-run activity types are skipped here; sync stores everything the
/// provider returns. A file that fails to parse propagates
/// [`crate::errors::Error::Corrupt`] rather than being silently dropped.
pub async fn load_runs(activities_dir: &Path) -> Result<Vec<Activity>> {
    let files = storage::list_json_files(activities_dir).await?;
    let mut runs = Vec::new();
    for path in &files {
        let activity: Activity = storage::read_json(path).await?;
        if activity.is_run() {
            runs.push(activity);
        }
    }
    runs.sort_by_key(Activity::start_timestamp);
    info!(
        runs = runs.len(),
        files = files.len(),
        "Loaded run history"
    );
    Ok(runs)
}
