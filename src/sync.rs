// ABOUTME: Resumable incremental activity sync driven page by page against a provider
// ABOUTME: Persists every fetched activity and checkpoints the sync cursor after each page
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Incremental activity synchronization
//!
//! The engine fetches activity pages from an [`ActivityProvider`], writes each
//! activity to its own JSON file, and advances a high-watermark cursor stored
//! via [`SyncStateStore`]. The cursor is committed after every page, so an
//! interrupted run resumes from the last committed page boundary instead of
//! refetching history.

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat};
use tracing::info;

use crate::constants::limits;
use crate::errors::Result;
use crate::models::Activity;
use crate::providers::ActivityProvider;
use crate::storage::{self, SyncStateStore};

/// Outcome of one sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Activities returned by the provider across all fetched pages
    pub total_fetched: u64,
    /// Activities that were not already present on disk before this run
    pub new_activities: u64,
    /// Non-empty pages fetched and committed
    pub pages_processed: u32,
}

/// Page-by-page sync engine with per-page cursor checkpointing.
pub struct ActivitySyncEngine<P> {
    provider: P,
    state_store: SyncStateStore,
    activities_dir: PathBuf,
}

impl<P: ActivityProvider> ActivitySyncEngine<P> {
    /// Create an engine that syncs `provider` into `activities_dir`.
    pub const fn new(provider: P, state_store: SyncStateStore, activities_dir: PathBuf) -> Self {
        Self {
            provider,
            state_store,
            activities_dir,
        }
    }

    /// Fetch all activities newer than the stored watermark and persist them.
    ///
    /// The watermark is the maximum `start_date` timestamp seen across every
    /// activity of every committed page; pages are not guaranteed sorted, so
    /// the first element alone is never trusted. Any fetch or storage error
    /// propagates immediately and leaves the cursor at the last committed
    /// page, ready for the next invocation to resume.
    pub async fn sync_new_activities(&self) -> Result<SyncReport> {
        let mut state = self.state_store.load().await?;
        let after = if state.is_first_sync() {
            None
        } else {
            Some(state.last_sync_timestamp)
        };

        if let Some(timestamp) = after {
            info!(
                provider = self.provider.provider_name(),
                since = %render_watermark(timestamp),
                timestamp,
                "Starting incremental sync from last watermark"
            );
        } else {
            info!(
                provider = self.provider.provider_name(),
                "Starting sync from beginning of history (first sync)"
            );
        }

        let per_page = limits::ACTIVITIES_PER_PAGE;
        let mut report = SyncReport::default();

        for page in 1_usize.. {
            let activities = self.provider.get_activities(after, page, per_page).await?;
            if activities.is_empty() {
                info!(page, "No more activities to fetch (empty page)");
                break;
            }

            report.total_fetched += activities.len() as u64;
            let new_on_page = self.persist_page(&activities).await?;
            report.new_activities += new_on_page;

            let mut watermark = state.last_sync_timestamp;
            for activity in &activities {
                watermark = watermark.max(activity.start_timestamp());
            }

            state.last_sync_timestamp = watermark;
            if let Some(first) = activities.first() {
                state.last_activity_id = first.id.to_string();
            }
            state.total_activities += activities.len() as u64;
            state.last_sync_date = render_watermark(watermark);
            self.state_store.save(&state).await?;

            report.pages_processed += 1;
            info!(
                page,
                fetched = activities.len(),
                new = new_on_page,
                watermark = state.last_sync_timestamp,
                "Page committed"
            );

            if activities.len() < per_page {
                info!(page, "Last page reached (short page)");
                break;
            }
        }

        info!(
            new_activities = report.new_activities,
            total_fetched = report.total_fetched,
            pages_processed = report.pages_processed,
            "Sync complete"
        );
        Ok(report)
    }

    /// Write every activity of a page to disk, returning how many were new.
    ///
    /// Writes are upserts keyed by activity id, so re-syncing an overlapping
    /// range refreshes existing files without inflating the new count.
    async fn persist_page(&self, activities: &[Activity]) -> Result<u64> {
        let mut new_count = 0;
        for activity in activities {
            let path = self.activities_dir.join(format!("{}.json", activity.id));
            let already_known = storage::exists(&path).await;
            storage::write_json(&path, activity).await?;
            if !already_known {
                new_count += 1;
            }
        }
        Ok(new_count)
    }
}

/// Render a Unix timestamp as ISO-8601 with millisecond precision and `Z`.
fn render_watermark(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|moment| moment.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
