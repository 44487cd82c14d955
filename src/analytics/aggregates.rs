// ABOUTME: Weekly, monthly, yearly, and all-time rollups over the run history
// ABOUTME: Writes the stable camelCase artifact files consumed by the rendering layer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Period aggregates
//!
//! Field names of every artifact are a public contract; serde renames pin
//! them to the exact camelCase spelling regardless of Rust naming.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::artifacts;
use crate::errors::Result;
use crate::models::Activity;
use crate::storage;

use super::dates;

/// One Monday-start week of running volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    /// Monday 00:00:00 UTC of the week, ISO-8601
    #[serde(rename = "weekStartISO")]
    pub week_start_iso: String,
    /// Total distance in kilometers
    pub total_km: f64,
    /// Number of runs
    pub run_count: u32,
    /// Average pace in minutes per kilometer, 0 when no distance
    pub avg_pace_min_per_km: f64,
    /// Total elevation gain in meters
    pub elevation_gain: f64,
    /// Total moving time in minutes
    pub total_moving_time_min: f64,
}

/// Cumulative totals over the entire history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeTotals {
    pub total_km: f64,
    pub total_runs: u32,
    /// Total moving time in hours
    pub total_hours: f64,
    /// Total elevation gain in meters
    pub total_elevation: f64,
    pub avg_pace_min_per_km: f64,
    /// Start time of the earliest run, ISO-8601
    pub first_activity_date: String,
    /// Start time of the latest run, ISO-8601
    pub last_activity_date: String,
    /// When this artifact was computed, ISO-8601
    pub generated_at: String,
}

/// One calendar period (month or year) of running volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    /// First instant of the period, ISO-8601
    pub period_start: String,
    /// Human-readable label, `"Jan 2024"` for months and `"2024"` for years
    pub period_label: String,
    pub total_km: f64,
    pub run_count: u32,
    pub avg_pace_min_per_km: f64,
    pub elevation_gain: f64,
    pub total_moving_time_min: f64,
}

/// Provenance record written alongside the aggregate artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsMetadata {
    pub generated_at: String,
    /// Number of runs the artifacts were computed from
    pub activity_count: u32,
    pub date_range: DateRange,
    /// Artifact file names this generation produced, itself included
    pub files: Vec<String>,
}

/// Inclusive activity date range of the processed history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

/// Running totals for one grouping bucket.
#[derive(Debug, Clone, Copy, Default)]
struct PeriodAccumulator {
    distance_meters: f64,
    run_count: u32,
    moving_time_secs: u64,
    elevation_gain: f64,
}

impl PeriodAccumulator {
    fn add(&mut self, activity: &Activity) {
        self.distance_meters += activity.distance;
        self.run_count += 1;
        self.moving_time_secs += activity.moving_time;
        self.elevation_gain += activity.total_elevation_gain;
    }

    fn total_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    fn moving_minutes(&self) -> f64 {
        self.moving_time_secs as f64 / 60.0
    }

    /// Moving minutes per kilometer, 0 for a zero-distance bucket.
    fn avg_pace_min_per_km(&self) -> f64 {
        if self.distance_meters > 0.0 {
            self.moving_minutes() / self.total_km()
        } else {
            0.0
        }
    }
}

fn accumulate_by<F>(runs: &[Activity], bucket: F) -> BTreeMap<NaiveDate, PeriodAccumulator>
where
    F: Fn(DateTime<Utc>) -> NaiveDate,
{
    let mut buckets: BTreeMap<NaiveDate, PeriodAccumulator> = BTreeMap::new();
    for run in runs {
        buckets.entry(bucket(run.start_date)).or_default().add(run);
    }
    buckets
}

/// Weekly rollup sorted by week start.
pub fn weekly_stats(runs: &[Activity]) -> Vec<WeeklyStats> {
    accumulate_by(runs, dates::week_start)
        .iter()
        .map(|(&week, acc)| WeeklyStats {
            week_start_iso: dates::iso_millis(dates::day_start_utc(week)),
            total_km: acc.total_km(),
            run_count: acc.run_count,
            avg_pace_min_per_km: acc.avg_pace_min_per_km(),
            elevation_gain: acc.elevation_gain,
            total_moving_time_min: acc.moving_minutes(),
        })
        .collect()
}

/// Monthly rollup sorted by month start.
pub fn monthly_stats(runs: &[Activity]) -> Vec<PeriodStats> {
    accumulate_by(runs, dates::month_start)
        .iter()
        .map(|(&month, acc)| period_entry(month, dates::month_label(month), acc))
        .collect()
}

/// Yearly rollup sorted by year.
pub fn yearly_stats(runs: &[Activity]) -> Vec<PeriodStats> {
    use chrono::Datelike;
    accumulate_by(runs, dates::year_start)
        .iter()
        .map(|(&year, acc)| period_entry(year, year.year().to_string(), acc))
        .collect()
}

fn period_entry(start: NaiveDate, label: String, acc: &PeriodAccumulator) -> PeriodStats {
    PeriodStats {
        period_start: dates::iso_millis(dates::day_start_utc(start)),
        period_label: label,
        total_km: acc.total_km(),
        run_count: acc.run_count,
        avg_pace_min_per_km: acc.avg_pace_min_per_km(),
        elevation_gain: acc.elevation_gain,
        total_moving_time_min: acc.moving_minutes(),
    }
}

/// All-time totals; `None` when there are no runs.
///
/// `runs` must be sorted by start date, which the shared loader guarantees;
/// the first and last elements bound the date range.
pub fn all_time_totals(runs: &[Activity], generated_at: DateTime<Utc>) -> Option<AllTimeTotals> {
    let first = runs.first()?;
    let last = runs.last()?;

    let mut acc = PeriodAccumulator::default();
    for run in runs {
        acc.add(run);
    }

    Some(AllTimeTotals {
        total_km: acc.total_km(),
        total_runs: acc.run_count,
        total_hours: acc.moving_time_secs as f64 / 3600.0,
        total_elevation: acc.elevation_gain,
        avg_pace_min_per_km: acc.avg_pace_min_per_km(),
        first_activity_date: dates::iso_millis(first.start_date),
        last_activity_date: dates::iso_millis(last.start_date),
        generated_at: dates::iso_millis(generated_at),
    })
}

/// Compute the period aggregates and write them into the stats directory.
///
/// No runs on disk means nothing is written, matching an empty history
/// rather than producing misleading zero artifacts.
pub async fn compute_stats(activities_dir: &Path, stats_dir: &Path) -> Result<()> {
    let runs = super::load_runs(activities_dir).await?;
    let now = Utc::now();

    let weekly = weekly_stats(&runs);
    let monthly = monthly_stats(&runs);
    let yearly = yearly_stats(&runs);
    let Some(totals) = all_time_totals(&runs, now) else {
        info!("No run activities to process; no aggregate artifacts written");
        return Ok(());
    };

    storage::write_json(&stats_dir.join(artifacts::WEEKLY_DISTANCE_FILE), &weekly).await?;
    storage::write_json(&stats_dir.join(artifacts::ALL_TIME_TOTALS_FILE), &totals).await?;
    storage::write_json(&stats_dir.join(artifacts::MONTHLY_STATS_FILE), &monthly).await?;
    storage::write_json(&stats_dir.join(artifacts::YEARLY_STATS_FILE), &yearly).await?;

    let metadata = StatsMetadata {
        generated_at: dates::iso_millis(now),
        activity_count: runs.len() as u32,
        date_range: DateRange {
            from: totals.first_activity_date.clone(),
            to: totals.last_activity_date.clone(),
        },
        files: vec![
            artifacts::WEEKLY_DISTANCE_FILE.to_owned(),
            artifacts::ALL_TIME_TOTALS_FILE.to_owned(),
            artifacts::MONTHLY_STATS_FILE.to_owned(),
            artifacts::YEARLY_STATS_FILE.to_owned(),
            artifacts::METADATA_FILE.to_owned(),
        ],
    };
    storage::write_json(&stats_dir.join(artifacts::METADATA_FILE), &metadata).await?;

    info!(
        weeks = weekly.len(),
        months = monthly.len(),
        years = yearly.len(),
        total_runs = totals.total_runs,
        total_km = totals.total_km,
        "Aggregate artifacts written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn run(id: u64, start: DateTime<Utc>, meters: f64, moving_secs: u64, gain: f64) -> Activity {
        Activity {
            id,
            name: format!("Run {id}"),
            activity_type: "Run".to_owned(),
            start_date: start,
            distance: meters,
            moving_time: moving_secs,
            elapsed_time: moving_secs,
            total_elevation_gain: gain,
            ..Activity::default()
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn weekly_stats_group_by_monday_week() {
        // Two runs in the week of Mon 2024-01-01, one in the next week
        let runs = [
            run(1, at(2024, 1, 2, 9), 5000.0, 1500, 40.0),
            run(2, at(2024, 1, 6, 9), 10000.0, 3300, 80.0),
            run(3, at(2024, 1, 8, 9), 8000.0, 2400, 60.0),
        ];
        let weekly = weekly_stats(&runs);
        assert_eq!(weekly.len(), 2);

        let first = &weekly[0];
        assert_eq!(first.week_start_iso, "2024-01-01T00:00:00.000Z");
        assert_eq!(first.run_count, 2);
        assert!(close(first.total_km, 15.0));
        assert!(close(first.elevation_gain, 120.0));
        assert!(close(first.total_moving_time_min, 80.0));
        // 80 moving minutes over 15 km
        assert!(close(first.avg_pace_min_per_km, 80.0 / 15.0));

        assert_eq!(weekly[1].week_start_iso, "2024-01-08T00:00:00.000Z");
        assert_eq!(weekly[1].run_count, 1);
    }

    #[test]
    fn zero_distance_pace_is_guarded() {
        let runs = [run(1, at(2024, 1, 2, 9), 0.0, 600, 0.0)];
        let weekly = weekly_stats(&runs);
        assert!(close(weekly[0].avg_pace_min_per_km, 0.0));
    }

    #[test]
    fn monthly_and_yearly_labels() {
        let runs = [
            run(1, at(2023, 12, 30, 8), 5000.0, 1500, 10.0),
            run(2, at(2024, 1, 15, 8), 5000.0, 1500, 10.0),
        ];
        let monthly = monthly_stats(&runs);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].period_label, "Dec 2023");
        assert_eq!(monthly[0].period_start, "2023-12-01T00:00:00.000Z");
        assert_eq!(monthly[1].period_label, "Jan 2024");

        let yearly = yearly_stats(&runs);
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[0].period_label, "2023");
        assert_eq!(yearly[1].period_label, "2024");
        assert_eq!(yearly[1].period_start, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn all_time_totals_span_the_history() {
        let runs = [
            run(1, at(2023, 6, 1, 7), 10000.0, 3600, 100.0),
            run(2, at(2024, 6, 1, 7), 10000.0, 3600, 100.0),
        ];
        let totals = all_time_totals(&runs, at(2024, 7, 1, 0)).unwrap();
        assert_eq!(totals.total_runs, 2);
        assert!(close(totals.total_km, 20.0));
        assert!(close(totals.total_hours, 2.0));
        assert!(close(totals.total_elevation, 200.0));
        assert!(close(totals.avg_pace_min_per_km, 120.0 / 20.0));
        assert_eq!(totals.first_activity_date, "2023-06-01T07:00:00.000Z");
        assert_eq!(totals.last_activity_date, "2024-06-01T07:00:00.000Z");
        assert_eq!(totals.generated_at, "2024-07-01T00:00:00.000Z");
    }

    #[test]
    fn all_time_totals_empty_is_none() {
        assert!(all_time_totals(&[], Utc::now()).is_none());
    }

    #[test]
    fn artifact_field_names_are_camel_case() {
        let runs = [run(1, at(2024, 1, 2, 9), 5000.0, 1500, 40.0)];
        let weekly = serde_json::to_value(weekly_stats(&runs)).unwrap();
        let entry = &weekly[0];
        for key in [
            "weekStartISO",
            "totalKm",
            "runCount",
            "avgPaceMinPerKm",
            "elevationGain",
            "totalMovingTimeMin",
        ] {
            assert!(entry.get(key).is_some(), "missing key {key}");
        }

        let totals =
            serde_json::to_value(all_time_totals(&runs, at(2024, 2, 1, 0)).unwrap()).unwrap();
        for key in [
            "totalKm",
            "totalRuns",
            "totalHours",
            "totalElevation",
            "avgPaceMinPerKm",
            "firstActivityDate",
            "lastActivityDate",
            "generatedAt",
        ] {
            assert!(totals.get(key).is_some(), "missing key {key}");
        }

        let monthly = serde_json::to_value(monthly_stats(&runs)).unwrap();
        assert!(monthly[0].get("periodStart").is_some());
        assert!(monthly[0].get("periodLabel").is_some());
    }
}
