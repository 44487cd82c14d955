// ABOUTME: Daily running streak computation over UTC calendar dates
// ABOUTME: Tracks the longest run of consecutive days and whether a streak is still alive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily streaks
//!
//! A streak is a run of consecutive UTC calendar days each containing at
//! least one activity. Multiple activities on the same day count once. The
//! "current" streak is only reported when it is still alive, meaning the most
//! recent activity day is today or yesterday; a trailing run that ended
//! earlier shows up in `longest_streak` but not in `current_streak`.

use chrono::{DateTime, NaiveDate, Utc};

/// Result of a daily streak computation. Recomputed from scratch each time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakResult {
    /// Length of the streak ending today or yesterday, 0 when none is alive
    pub current_streak: u32,
    /// Longest run of consecutive activity days anywhere in the history
    pub longest_streak: u32,
    /// Whether the most recent activity day is today or yesterday (UTC)
    pub within_current_streak: bool,
    /// First day of the live streak, when one exists
    pub current_streak_start: Option<NaiveDate>,
    /// First day of the longest streak
    pub longest_streak_start: Option<NaiveDate>,
    /// Last day of the longest streak
    pub longest_streak_end: Option<NaiveDate>,
}

/// Compute daily streaks from activity start times, evaluated against the
/// current UTC date.
pub fn calculate_daily_streaks(timestamps: &[DateTime<Utc>]) -> StreakResult {
    daily_streaks_as_of(timestamps, Utc::now().date_naive())
}

/// Streak computation pinned to an explicit evaluation date.
///
/// Liveness compares the most recent activity day against `today`; the
/// wall-clock entry point passes the current UTC date.
pub fn daily_streaks_as_of(timestamps: &[DateTime<Utc>], today: NaiveDate) -> StreakResult {
    let mut days: Vec<NaiveDate> = timestamps.iter().map(DateTime::date_naive).collect();
    days.sort_unstable();
    days.dedup();

    let Some(&first) = days.first() else {
        return StreakResult::default();
    };

    let mut longest = 1_u32;
    let mut longest_start = first;
    let mut longest_end = first;
    let mut run_length = 1_u32;
    let mut run_start = first;

    for pair in days.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run_length += 1;
        } else {
            run_length = 1;
            run_start = pair[1];
        }
        if run_length > longest {
            longest = run_length;
            longest_start = run_start;
            longest_end = pair[1];
        }
    }

    // days is non-empty, checked above
    let most_recent = days.last().copied().unwrap_or(first);
    let within = (today - most_recent).num_days() <= 1;

    StreakResult {
        current_streak: if within { run_length } else { 0 },
        longest_streak: longest,
        within_current_streak: within,
        current_streak_start: within.then_some(run_start),
        longest_streak_start: Some(longest_start),
        longest_streak_end: Some(longest_end),
    }
}
