// ABOUTME: Status command for the paceline CLI
// ABOUTME: Shows the sync cursor and how many activity files exist on disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use paceline::config::AppConfig;
use paceline::errors::Result;
use paceline::storage::{self, SyncStateStore};

/// Print the current sync state, or a pointer to `sync` when none exists.
pub async fn run(config: &AppConfig) -> Result<()> {
    let store = SyncStateStore::new(config.storage.sync_state_path());
    let state = store.load().await?;

    if state.is_first_sync() {
        println!("No sync has been performed yet");
        println!("Run: paceline sync");
        return Ok(());
    }

    println!("=== Sync Status ===");
    println!("Last sync: {}", state.last_sync_date);
    println!("Total activities: {}", state.total_activities);
    println!("Last activity ID: {}", state.last_activity_id);

    let files = storage::list_json_files(&config.storage.activities_dir()).await?;
    println!("Activities on disk: {}", files.len());
    Ok(())
}
