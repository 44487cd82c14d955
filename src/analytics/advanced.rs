// ABOUTME: Year-over-year, time-of-day, seasonal, and streak artifact generation
// ABOUTME: Compares monthly volume across recent years and buckets runs by hour of day
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Advanced analytics artifacts
//!
//! These artifacts cover the three most recent calendar years with data.
//! Year-over-year emits all twelve months zero-filled so chart axes stay
//! stable; seasonal trends only carries months that actually had runs.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::artifacts;
use crate::errors::Result;
use crate::models::Activity;
use crate::storage;

use super::consistency::{self, WeeklyConsistencyResult};
use super::dates;
use super::streaks::{self, StreakResult};

/// How many recent years the comparison artifacts cover.
const COMPARED_YEARS: usize = 3;

const TIME_OF_DAY_PERIODS: [&str; 4] = [
    "Morning (6am-12pm)",
    "Afternoon (12pm-6pm)",
    "Evening (6pm-10pm)",
    "Night (10pm-6am)",
];

/// One calendar month compared across the covered years.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearOverYearMonth {
    /// Month number, 1 through 12
    pub month: u32,
    /// English month abbreviation, `"Jan"` through `"Dec"`
    pub month_label: String,
    /// Volume per year keyed by the year rendered as a string
    pub years: BTreeMap<String, YearVolume>,
}

/// Running volume within one bucket.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearVolume {
    pub total_km: f64,
    pub total_runs: u32,
    /// Moving time in hours
    pub total_hours: f64,
}

impl YearVolume {
    fn add(&mut self, activity: &Activity) {
        self.total_km += activity.distance / 1000.0;
        self.total_runs += 1;
        self.total_hours += activity.moving_time as f64 / 3600.0;
    }
}

/// Run distribution for one time-of-day bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayPattern {
    /// Bucket label, e.g. `"Morning (6am-12pm)"`
    pub period: String,
    pub run_count: u32,
    pub total_km: f64,
    /// Share of all runs in this bucket, 0 to 100
    pub percentage: f64,
}

/// Volume for one active month of a covered year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalTrendMonth {
    pub year: i32,
    /// Month number, 1 through 12
    pub month: u32,
    pub total_km: f64,
    pub total_runs: u32,
    pub total_hours: f64,
}

/// Merged streak summary written as `streaks.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreakArtifact {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub within_current_streak: bool,
    /// Midnight UTC of the day, ISO-8601; `null` when no streak is alive
    pub current_streak_start: Option<String>,
    pub longest_streak_start: Option<String>,
    pub longest_streak_end: Option<String>,
    pub weekly_consistency: WeeklyConsistencyArtifact,
}

/// Weekly consistency block inside [`StreakArtifact`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyConsistencyArtifact {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_consistent_weeks: u32,
    pub total_weeks: u32,
    /// Threshold the qualification used, echoed for the rendering layer
    pub min_runs_per_week: u32,
}

fn monthly_volumes(runs: &[Activity]) -> BTreeMap<(i32, u32), YearVolume> {
    let mut volumes: BTreeMap<(i32, u32), YearVolume> = BTreeMap::new();
    for run in runs {
        let key = (run.start_date.year(), run.start_date.month());
        volumes.entry(key).or_default().add(run);
    }
    volumes
}

fn recent_years(volumes: &BTreeMap<(i32, u32), YearVolume>) -> Vec<i32> {
    let years: BTreeSet<i32> = volumes.keys().map(|&(year, _)| year).collect();
    let mut recent: Vec<i32> = years.into_iter().rev().take(COMPARED_YEARS).collect();
    recent.reverse();
    recent
}

/// Twelve months of volume comparison across the recent years, zero-filled.
pub fn year_over_year(runs: &[Activity]) -> Vec<YearOverYearMonth> {
    let volumes = monthly_volumes(runs);
    let recent = recent_years(&volumes);

    (1..=12)
        .map(|month| YearOverYearMonth {
            month,
            month_label: dates::month_abbrev(month).to_owned(),
            years: recent
                .iter()
                .map(|&year| {
                    let volume = volumes.get(&(year, month)).copied().unwrap_or_default();
                    (year.to_string(), volume)
                })
                .collect(),
        })
        .collect()
}

/// Run distribution over the four fixed time-of-day buckets, by UTC hour.
pub fn time_of_day(runs: &[Activity]) -> Vec<TimeOfDayPattern> {
    let mut counts = [0_u32; 4];
    let mut kilometers = [0.0_f64; 4];
    for run in runs {
        let index = bucket_index(run.start_date.hour());
        counts[index] += 1;
        kilometers[index] += run.distance / 1000.0;
    }

    let total_runs = runs.len() as f64;
    TIME_OF_DAY_PERIODS
        .iter()
        .enumerate()
        .map(|(index, &period)| TimeOfDayPattern {
            period: period.to_owned(),
            run_count: counts[index],
            total_km: kilometers[index],
            percentage: if total_runs > 0.0 {
                f64::from(counts[index]) / total_runs * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

const fn bucket_index(hour: u32) -> usize {
    match hour {
        6..=11 => 0,
        12..=17 => 1,
        18..=21 => 2,
        _ => 3,
    }
}

/// Per-month volume for the recent years, sorted by year then month.
pub fn seasonal_trends(runs: &[Activity]) -> Vec<SeasonalTrendMonth> {
    let volumes = monthly_volumes(runs);
    let recent = recent_years(&volumes);

    volumes
        .iter()
        .filter(|((year, _), _)| recent.contains(year))
        .map(|(&(year, month), volume)| SeasonalTrendMonth {
            year,
            month,
            total_km: volume.total_km,
            total_runs: volume.total_runs,
            total_hours: volume.total_hours,
        })
        .collect()
}

/// Run both streak analyzers and merge their output into the artifact shape.
pub fn streak_artifact(runs: &[Activity], min_runs_per_week: u32) -> StreakArtifact {
    let timestamps: Vec<DateTime<Utc>> = runs.iter().map(|run| run.start_date).collect();
    let daily = streaks::calculate_daily_streaks(&timestamps);
    let weekly = consistency::calculate_weekly_consistency(&timestamps, min_runs_per_week);
    merge_streaks(&daily, &weekly, min_runs_per_week)
}

fn merge_streaks(
    daily: &StreakResult,
    weekly: &WeeklyConsistencyResult,
    min_runs_per_week: u32,
) -> StreakArtifact {
    StreakArtifact {
        current_streak: daily.current_streak,
        longest_streak: daily.longest_streak,
        within_current_streak: daily.within_current_streak,
        current_streak_start: daily.current_streak_start.map(render_day),
        longest_streak_start: daily.longest_streak_start.map(render_day),
        longest_streak_end: daily.longest_streak_end.map(render_day),
        weekly_consistency: WeeklyConsistencyArtifact {
            current_streak: weekly.current_consistency_streak,
            longest_streak: weekly.longest_consistency_streak,
            total_consistent_weeks: weekly.total_consistent_weeks,
            total_weeks: weekly.total_weeks,
            min_runs_per_week,
        },
    }
}

fn render_day(date: NaiveDate) -> String {
    dates::iso_millis(dates::day_start_utc(date))
}

/// Compute the advanced artifacts and write them into the stats directory.
pub async fn compute_advanced_stats(
    activities_dir: &Path,
    stats_dir: &Path,
    min_runs_per_week: u32,
) -> Result<()> {
    let runs = super::load_runs(activities_dir).await?;
    if runs.is_empty() {
        info!("No run activities to process; no advanced artifacts written");
        return Ok(());
    }

    let yearly = year_over_year(&runs);
    let daily_pattern = time_of_day(&runs);
    let seasonal = seasonal_trends(&runs);
    let streaks_summary = streak_artifact(&runs, min_runs_per_week);

    storage::write_json(&stats_dir.join(artifacts::YEAR_OVER_YEAR_FILE), &yearly).await?;
    storage::write_json(&stats_dir.join(artifacts::TIME_OF_DAY_FILE), &daily_pattern).await?;
    storage::write_json(&stats_dir.join(artifacts::SEASONAL_TRENDS_FILE), &seasonal).await?;
    storage::write_json(&stats_dir.join(artifacts::STREAKS_FILE), &streaks_summary).await?;

    info!(
        seasonal_months = seasonal.len(),
        longest_streak = streaks_summary.longest_streak,
        "Advanced artifacts written"
    );
    Ok(())
}
