// ABOUTME: Weekly training consistency computed over Monday-start UTC weeks
// ABOUTME: Counts qualifying weeks and runs of consecutive qualifying weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weekly consistency
//!
//! Activities are bucketed into Monday-start UTC weeks. A week qualifies
//! when it holds at least `min_runs_per_week` activities; a consistency
//! streak is a run of qualifying weeks each exactly seven days after its
//! predecessor. Weeks with no activity at all have no bucket and therefore
//! break streaks.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::dates;

/// Result of a weekly consistency computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyConsistencyResult {
    /// Run of qualifying weeks ending at the most recent active week, 0 when
    /// that week does not qualify
    pub current_consistency_streak: u32,
    /// Longest run of consecutive qualifying weeks
    pub longest_consistency_streak: u32,
    /// Qualifying weeks anywhere in the history, consecutive or not
    pub total_consistent_weeks: u32,
    /// Weeks containing at least one activity
    pub total_weeks: u32,
}

/// Compute weekly consistency from activity start times.
pub fn calculate_weekly_consistency(
    timestamps: &[DateTime<Utc>],
    min_runs_per_week: u32,
) -> WeeklyConsistencyResult {
    let mut weeks: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for moment in timestamps {
        *weeks.entry(dates::week_start(*moment)).or_insert(0) += 1;
    }
    if weeks.is_empty() {
        return WeeklyConsistencyResult::default();
    }

    let mut result = WeeklyConsistencyResult {
        total_weeks: weeks.len() as u32,
        ..WeeklyConsistencyResult::default()
    };

    let mut run_length = 0_u32;
    let mut previous: Option<(NaiveDate, bool)> = None;
    for (&week, &count) in &weeks {
        let qualifies = count >= min_runs_per_week;
        if qualifies {
            result.total_consistent_weeks += 1;
            let extends = previous
                .is_some_and(|(prior, prior_qualified)| {
                    prior_qualified && (week - prior).num_days() == 7
                });
            run_length = if extends { run_length + 1 } else { 1 };
            result.longest_consistency_streak = result.longest_consistency_streak.max(run_length);
        } else {
            run_length = 0;
        }
        previous = Some((week, qualifies));
    }

    // The iteration ends on the chronologically last week, so the running
    // length is the current streak exactly when that week qualified.
    result.current_consistency_streak = run_length;
    result
}
