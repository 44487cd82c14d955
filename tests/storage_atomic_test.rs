// ABOUTME: Integration tests for atomic JSON storage and the sync cursor store
// ABOUTME: Validates replace-on-rename semantics, typed error mapping, and directory listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use paceline::errors::Error;
use paceline::storage::{self, SyncState, SyncStateStore};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct Payload {
    name: String,
    count: u32,
}

#[tokio::test]
async fn test_write_then_read_round_trips() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("payload.json");

    let value = Payload {
        name: "tempo".to_owned(),
        count: 12,
    };
    storage::write_json(&path, &value).await?;

    let back: Payload = storage::read_json(&path).await?;
    assert_eq!(back, value);
    Ok(())
}

#[tokio::test]
async fn test_write_creates_missing_parent_directories() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("nested/deeper/out.json");

    storage::write_json(&path, &Payload {
        name: "easy".to_owned(),
        count: 1,
    })
    .await?;

    assert!(path.exists());
    Ok(())
}

#[tokio::test]
async fn test_overwrite_replaces_content_completely() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("payload.json");

    storage::write_json(&path, &Payload {
        name: "long original value that is wider than the replacement".to_owned(),
        count: 1,
    })
    .await?;
    storage::write_json(&path, &Payload {
        name: "short".to_owned(),
        count: 2,
    })
    .await?;

    // A partial in-place overwrite would leave trailing bytes of the longer
    // original; a full replace parses cleanly.
    let back: Payload = storage::read_json(&path).await?;
    assert_eq!(back.name, "short");
    assert_eq!(back.count, 2);
    Ok(())
}

#[tokio::test]
async fn test_successful_write_leaves_no_temp_sibling() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("payload.json");

    storage::write_json(&path, &Payload {
        name: "solo".to_owned(),
        count: 3,
    })
    .await?;

    let mut names = Vec::new();
    let mut entries = fs::read_dir(temp_dir.path()).await?;
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    assert_eq!(names, vec!["payload.json"]);
    Ok(())
}

#[tokio::test]
async fn test_failed_replace_cleans_temp_and_keeps_target() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // A directory at the target path makes the final rename fail after the
    // temp file was written
    let path = temp_dir.path().join("occupied");
    fs::create_dir(&path).await?;

    let result = storage::write_json(&path, &Payload {
        name: "doomed".to_owned(),
        count: 9,
    })
    .await;
    assert!(matches!(result, Err(Error::Storage { .. })));

    assert!(path.is_dir());
    let mut entries = fs::read_dir(temp_dir.path()).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    assert_eq!(names, vec!["occupied"]);
    Ok(())
}

#[tokio::test]
async fn test_read_missing_file_is_not_found() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("absent.json");

    let result: paceline::errors::Result<Payload> = storage::read_json(&path).await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn test_read_garbage_is_corrupt_with_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, b"{\"name\": \"trunc").await?;

    let result: paceline::errors::Result<Payload> = storage::read_json(&path).await;
    match result {
        Err(Error::Corrupt { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Corrupt, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_list_json_files_filters_and_sorts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("20.json"), b"{}").await?;
    fs::write(temp_dir.path().join("10.json"), b"{}").await?;
    fs::write(temp_dir.path().join("notes.txt"), b"skip me").await?;
    fs::create_dir(temp_dir.path().join("subdir")).await?;

    let files = storage::list_json_files(temp_dir.path()).await?;
    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["10.json", "20.json"]);
    Ok(())
}

#[tokio::test]
async fn test_list_json_files_missing_dir_is_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = storage::list_json_files(&temp_dir.path().join("never-synced")).await?;
    assert!(files.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sync_state_store_defaults_when_absent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = SyncStateStore::new(temp_dir.path().join("sync-state.json"));

    let state = store.load().await?;
    assert!(state.is_first_sync());
    assert_eq!(state, SyncState::default());
    Ok(())
}

#[tokio::test]
async fn test_sync_state_store_round_trips() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = SyncStateStore::new(temp_dir.path().join("sync-state.json"));

    let state = SyncState {
        last_sync_timestamp: 1_700_000_000,
        last_activity_id: "12345".to_owned(),
        total_activities: 9,
        last_sync_date: "2023-11-14T22:13:20.000Z".to_owned(),
    };
    store.save(&state).await?;

    let back = store.load().await?;
    assert_eq!(back, state);
    assert!(!back.is_first_sync());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_cursor_is_never_silently_reset() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("sync-state.json");
    fs::write(&path, b"not json at all").await?;

    let store = SyncStateStore::new(path);
    let result = store.load().await;
    assert!(matches!(result, Err(Error::Corrupt { .. })));
    Ok(())
}
