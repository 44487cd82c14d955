// ABOUTME: UTC calendar helpers shared by the analytics modules
// ABOUTME: Week/month/year bucket starts, month labels, and ISO rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! UTC date helpers
//!
//! All grouping is done on UTC calendar dates. Local-time fields on the
//! activity are never consulted; two runs are "the same day" exactly when
//! their UTC dates match.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Monday of the UTC week containing `moment`.
pub fn week_start(moment: DateTime<Utc>) -> NaiveDate {
    let date = moment.date_naive();
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// First day of the UTC month containing `moment`.
pub fn month_start(moment: DateTime<Utc>) -> NaiveDate {
    let date = moment.date_naive();
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// January 1st of the UTC year containing `moment`.
pub fn year_start(moment: DateTime<Utc>) -> NaiveDate {
    let date = moment.date_naive();
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// English three-letter abbreviation for a 1-based month number.
pub fn month_abbrev(month: u32) -> &'static str {
    let index = month.saturating_sub(1) as usize;
    MONTH_ABBREVS.get(index).copied().unwrap_or("")
}

/// Label like `"Jan 2024"` for the month containing `date`.
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", month_abbrev(date.month()), date.year())
}

/// Midnight UTC at the start of `date`.
pub fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// ISO-8601 with millisecond precision and `Z` suffix.
pub fn iso_millis(moment: DateTime<Utc>) -> String {
    moment.to_rfc3339_opts(SecondsFormat::Millis, true)
}
