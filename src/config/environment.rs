// ABOUTME: Environment configuration management for credentials and storage layout
// ABOUTME: Handles environment variables, derived data paths, and analytics thresholds
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management

use crate::constants::{env_vars, oauth, storage};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Strava API endpoints and OAuth application credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StravaApiConfig {
    /// OAuth application client id
    pub client_id: String,
    /// OAuth application client secret
    pub client_secret: String,
    /// Strava API base URL
    pub base_url: String,
    /// Strava auth URL
    pub auth_url: String,
    /// Strava token URL, used for both code exchange and refresh
    pub token_url: String,
}

impl StravaApiConfig {
    /// Build a config pointing at the production Strava endpoints
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            base_url: oauth::STRAVA_API_BASE.to_owned(),
            auth_url: oauth::STRAVA_AUTH_URL.to_owned(),
            token_url: oauth::STRAVA_TOKEN_URL.to_owned(),
        }
    }
}

/// On-disk layout rooted at the data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all persisted state
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Path of the credential file
    #[must_use]
    pub fn tokens_path(&self) -> PathBuf {
        self.data_dir.join(storage::TOKENS_FILE)
    }

    /// Path of the sync cursor file
    #[must_use]
    pub fn sync_state_path(&self) -> PathBuf {
        self.data_dir.join(storage::SYNC_STATE_FILE)
    }

    /// Directory holding one JSON record per activity
    #[must_use]
    pub fn activities_dir(&self) -> PathBuf {
        self.data_dir.join(storage::ACTIVITIES_DIR)
    }

    /// Directory holding derived analytics artifacts
    #[must_use]
    pub fn stats_dir(&self) -> PathBuf {
        self.data_dir.join(storage::STATS_DIR)
    }
}

/// Analytics thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Runs required in an ISO week for it to count as consistent
    pub min_runs_per_week: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            min_runs_per_week: 3,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Strava endpoints and application credentials
    pub api: StravaApiConfig,
    /// Data directory layout
    pub storage: StorageConfig,
    /// Analytics thresholds
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first when one exists so local development does
    /// not require exporting credentials into the shell.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a required variable is missing or empty.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let client_id = required_var(env_vars::STRAVA_CLIENT_ID)?;
        let client_secret = required_var(env_vars::STRAVA_CLIENT_SECRET)?;
        let data_dir = env::var(env_vars::STRAVA_DATA_DIR)
            .ok()
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(storage::DEFAULT_DATA_DIR), PathBuf::from);

        info!(data_dir = %data_dir.display(), "Loaded configuration from environment");

        Ok(Self {
            api: StravaApiConfig::new(client_id, client_secret),
            storage: StorageConfig { data_dir },
            analytics: AnalyticsConfig::default(),
        })
    }
}

/// Read a required environment variable, treating an empty value as missing
fn required_var(name: &str) -> Result<String> {
    env::var(name).ok().filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::config(format!(
            "{name} environment variable is required. Create a .env file based on \
             .env.example and fill in your Strava API credentials. Get them from: \
             https://www.strava.com/settings/api"
        ))
    })
}
