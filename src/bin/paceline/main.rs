// ABOUTME: Paceline CLI - sync a Strava history to disk and derive running analytics
// ABOUTME: Dispatches auth, sync, status, and stats subcommands into the library
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Print the authorization URL
//! paceline auth
//!
//! # Exchange the authorization code for tokens
//! paceline auth YOUR_CODE_HERE
//!
//! # Fetch new activities since the last sync
//! paceline sync
//!
//! # Show the sync cursor and on-disk history
//! paceline status
//!
//! # Generate aggregate artifacts (weekly, monthly, yearly, all-time)
//! paceline stats compute
//!
//! # Generate advanced artifacts (year-over-year, time-of-day, streaks)
//! paceline stats advanced
//!
//! # Generate everything
//! paceline stats all
//! ```

mod commands;

use clap::{Parser, Subcommand};
use paceline::config::AppConfig;
use paceline::errors::Result;
use paceline::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "paceline",
    about = "Strava activity sync and running analytics, file-backed",
    long_about = "Incrementally syncs a Strava athlete's activity history into per-activity \
                  JSON files and derives streak, consistency, and volume artifacts from them."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Authorize against Strava: print the consent URL, or exchange a code
    Auth {
        /// Authorization code copied from the consent redirect
        code: Option<String>,

        /// Redirect URI registered with the Strava application
        #[arg(long, default_value = "http://localhost")]
        redirect_uri: String,
    },

    /// Fetch new activities since the last sync
    Sync,

    /// Show the sync cursor and the number of activities on disk
    Status,

    /// Compute analytics artifacts from the synced history
    Stats {
        #[command(subcommand)]
        action: StatsCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum StatsCommand {
    /// Weekly, monthly, yearly, and all-time aggregates
    Compute,

    /// Year-over-year, time-of-day, seasonal, and streak artifacts
    Advanced,

    /// Both aggregate and advanced artifacts
    All,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".to_owned();
    }
    logging.init()?;

    if let Err(error) = dispatch(cli.command).await {
        if let Some(hint) = error.remediation() {
            eprintln!("hint: {hint}");
        }
        return Err(error.into());
    }
    Ok(())
}

async fn dispatch(command: Command) -> Result<()> {
    let config = AppConfig::from_env()?;

    match command {
        Command::Auth { code, redirect_uri } => {
            commands::auth::run(&config, code.as_deref(), &redirect_uri).await
        }
        Command::Sync => commands::sync::run(&config).await,
        Command::Status => commands::status::run(&config).await,
        Command::Stats { action } => match action {
            StatsCommand::Compute => commands::stats::compute(&config).await,
            StatsCommand::Advanced => commands::stats::advanced(&config).await,
            StatsCommand::All => commands::stats::all(&config).await,
        },
    }
}
