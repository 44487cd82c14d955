// ABOUTME: Stats commands for the paceline CLI
// ABOUTME: Generates aggregate and advanced analytics artifacts from the synced history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use paceline::analytics;
use paceline::config::AppConfig;
use paceline::errors::Result;

/// Generate the weekly, monthly, yearly, and all-time aggregate artifacts.
pub async fn compute(config: &AppConfig) -> Result<()> {
    println!("Computing statistics from synced activities...");
    analytics::compute_stats(
        &config.storage.activities_dir(),
        &config.storage.stats_dir(),
    )
    .await?;
    println!("Statistics generated successfully");
    Ok(())
}

/// Generate the year-over-year, time-of-day, seasonal, and streak artifacts.
pub async fn advanced(config: &AppConfig) -> Result<()> {
    println!("Computing advanced statistics from synced activities...");
    analytics::compute_advanced_stats(
        &config.storage.activities_dir(),
        &config.storage.stats_dir(),
        config.analytics.min_runs_per_week,
    )
    .await?;
    println!("Advanced statistics generated successfully");
    Ok(())
}

/// Generate every artifact, aggregates first.
pub async fn all(config: &AppConfig) -> Result<()> {
    compute(config).await?;
    println!();
    advanced(config).await?;
    Ok(())
}
