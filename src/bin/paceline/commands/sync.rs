// ABOUTME: Sync command for the paceline CLI
// ABOUTME: Wires the Strava provider into the sync engine and prints the run summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use paceline::config::AppConfig;
use paceline::errors::Result;
use paceline::providers::StravaProvider;
use paceline::storage::SyncStateStore;
use paceline::sync::ActivitySyncEngine;

/// Fetch all activities newer than the stored watermark and print a summary.
pub async fn run(config: &AppConfig) -> Result<()> {
    let provider = StravaProvider::new(config);
    let state_store = SyncStateStore::new(config.storage.sync_state_path());
    let engine = ActivitySyncEngine::new(provider, state_store, config.storage.activities_dir());

    println!("Starting activity sync...");
    let report = engine.sync_new_activities().await?;

    println!();
    println!("=== Sync Summary ===");
    println!("New activities saved: {}", report.new_activities);
    println!("Total activities fetched: {}", report.total_fetched);
    println!("Pages processed: {}", report.pages_processed);
    Ok(())
}
