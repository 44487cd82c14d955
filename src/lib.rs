// ABOUTME: Library entry point for the paceline sync and analytics pipeline
// ABOUTME: Exposes storage, OAuth, provider, sync, and analytics modules to the CLI and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Paceline
//!
//! Single-account Strava sync and running analytics, file-backed.
//!
//! The pipeline has two halves:
//!
//! - **Sync**: incrementally fetch the athlete's activity history into one
//!   JSON file per activity, resumable after interruption, under a strict
//!   client-side request budget.
//! - **Analytics**: derive streaks, weekly consistency, and period rollups
//!   from the accumulated files, written as stable JSON artifacts for a
//!   rendering layer that lives elsewhere.
//!
//! ## Architecture
//!
//! - **storage**: atomic JSON persistence underneath everything else
//! - **`oauth2_client`**: credential lifecycle against the provider's token
//!   endpoint, including refresh token rotation
//! - **providers**: rate-limited, retry-classified activity fetching
//! - **sync**: the page-by-page engine tying the above together
//! - **analytics**: pure calendar computations plus artifact writers
//!
//! ## Example
//!
//! ```rust,no_run
//! use paceline::config::AppConfig;
//! use paceline::errors::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::from_env()?;
//!     println!("data directory: {}", config.storage.data_dir.display());
//!     Ok(())
//! }
//! ```

/// Streak, consistency, and period aggregate computation with artifact output
pub mod analytics;

/// Configuration structs built once from the environment
pub mod config;

/// Application constants grouped by domain
pub mod constants;

/// Closed error taxonomy shared by every module
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// Persisted data models: activities and OAuth credentials
pub mod models;

/// OAuth 2.0 client and credential manager
pub mod oauth2_client;

/// Activity providers: request budget, retry policy, remote API access
pub mod providers;

/// Atomic JSON file storage and the sync cursor
pub mod storage;

/// Resumable incremental sync engine
pub mod sync;

/// Small shared helpers
pub mod utils;
