// ABOUTME: Core data models for synced activities and OAuth credentials
// ABOUTME: Defines the Activity record, map payload, and stored Credential types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the data structures persisted by the sync pipeline.
//!
//! ## Design Principles
//!
//! - **Round-trip Safe**: unknown provider fields survive a
//!   deserialize/serialize cycle via `#[serde(flatten)]` passthrough
//! - **Wire Faithful**: field names and units match the provider responses,
//!   so a stored record is exactly what the API returned
//!
//! ## Core Models
//!
//! - `Activity`: one fetched activity, stored as `activities/<id>.json`
//! - `ActivityMap`: route polyline payload, kept opaque
//! - `Credential`: OAuth token set stored as `tokens.json`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single activity as returned by the provider.
///
/// All documented fields are typed; anything else the API sends is collected
/// into `extra` and written back out unchanged. Numeric summary fields
/// default to zero because some activity types omit them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    /// Provider-assigned numeric identifier, also the storage file name
    pub id: u64,
    /// Human-readable title
    pub name: String,
    /// Activity type string, e.g. "Run", "Ride"
    #[serde(rename = "type")]
    pub activity_type: String,
    /// When the activity started (UTC)
    pub start_date: DateTime<Utc>,
    /// Start time in the athlete's local timezone, kept verbatim
    #[serde(default)]
    pub start_date_local: String,
    /// Distance covered in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Elapsed wall-clock time in seconds
    #[serde(default)]
    pub elapsed_time: u64,
    /// Elevation gained in meters
    #[serde(default)]
    pub total_elevation_gain: f64,
    /// Average speed in meters per second
    #[serde(default)]
    pub average_speed: f64,
    /// Maximum speed in meters per second
    #[serde(default)]
    pub max_speed: f64,
    /// Average heart rate in BPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<f32>,
    /// Maximum heart rate in BPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<f32>,
    /// Start coordinates as `[latitude, longitude]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_latlng: Option<Vec<f64>>,
    /// End coordinates as `[latitude, longitude]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_latlng: Option<Vec<f64>>,
    /// Route map payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<ActivityMap>,
    /// Provider fields without a typed counterpart, preserved on round-trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activity {
    /// Whether this activity is a run, the type analytics operates on
    #[must_use]
    pub fn is_run(&self) -> bool {
        self.activity_type == "Run"
    }

    /// Start time as Unix epoch seconds
    #[must_use]
    pub fn start_timestamp(&self) -> i64 {
        self.start_date.timestamp()
    }
}

/// Route map payload attached to an activity.
///
/// The polyline is an encoded string and is never decoded here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityMap {
    /// Encoded summary polyline of the route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_polyline: Option<String>,
    /// Remaining map fields, preserved on round-trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// OAuth token set persisted as `tokens.json`.
///
/// The provider rotates the refresh token on every refresh, so the value
/// here is the only one that will be accepted next time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token for API requests
    pub access_token: String,
    /// Single-use token for obtaining the next access token
    pub refresh_token: String,
    /// Access token expiry as Unix epoch seconds
    pub expires_at: i64,
}

impl Credential {
    /// Seconds remaining until the access token expires, negative when past
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        self.expires_at - now.timestamp()
    }

    /// Whether the access token expires within `threshold_secs` of `now`
    #[must_use]
    pub fn expires_within(&self, threshold_secs: i64, now: DateTime<Utc>) -> bool {
        self.seconds_until_expiry(now) < threshold_secs
    }
}
