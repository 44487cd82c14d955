// ABOUTME: Integration tests for environment-based configuration loading
// ABOUTME: Validates required variable errors, defaults, and derived storage paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use paceline::config::AppConfig;
use paceline::errors::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const CLIENT_ID: &str = "STRAVA_CLIENT_ID";
const CLIENT_SECRET: &str = "STRAVA_CLIENT_SECRET";
const DATA_DIR: &str = "STRAVA_DATA_DIR";

fn clear_all() {
    env::remove_var(CLIENT_ID);
    env::remove_var(CLIENT_SECRET);
    env::remove_var(DATA_DIR);
}

#[test]
#[serial]
fn test_missing_client_id_is_config_error_naming_the_variable() {
    clear_all();

    let result = AppConfig::from_env();
    match result {
        Err(Error::Config(message)) => {
            assert!(message.contains("STRAVA_CLIENT_ID"), "message: {message}");
            assert!(message.contains(".env"), "message: {message}");
        }
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_empty_client_secret_treated_as_missing() {
    clear_all();
    env::set_var(CLIENT_ID, "163846");
    env::set_var(CLIENT_SECRET, "");

    let result = AppConfig::from_env();
    match result {
        Err(Error::Config(message)) => {
            assert!(message.contains("STRAVA_CLIENT_SECRET"), "message: {message}");
        }
        other => panic!("expected Config error, got {other:?}"),
    }
    clear_all();
}

#[test]
#[serial]
fn test_data_dir_defaults_when_unset() {
    clear_all();
    env::set_var(CLIENT_ID, "163846");
    env::set_var(CLIENT_SECRET, "shhh");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
    assert_eq!(config.api.client_id, "163846");
    assert_eq!(config.api.base_url, "https://www.strava.com/api/v3");
    assert_eq!(config.analytics.min_runs_per_week, 3);
    clear_all();
}

#[test]
#[serial]
fn test_custom_data_dir_drives_every_derived_path() {
    clear_all();
    env::set_var(CLIENT_ID, "163846");
    env::set_var(CLIENT_SECRET, "shhh");
    env::set_var(DATA_DIR, "/tmp/paceline-test-data");

    let config = AppConfig::from_env().unwrap();
    let root = PathBuf::from("/tmp/paceline-test-data");
    assert_eq!(config.storage.data_dir, root);
    assert_eq!(config.storage.tokens_path(), root.join("tokens.json"));
    assert_eq!(config.storage.sync_state_path(), root.join("sync-state.json"));
    assert_eq!(config.storage.activities_dir(), root.join("activities"));
    assert_eq!(config.storage.stats_dir(), root.join("stats"));
    clear_all();
}

#[test]
#[serial]
fn test_empty_data_dir_falls_back_to_default() {
    clear_all();
    env::set_var(CLIENT_ID, "163846");
    env::set_var(CLIENT_SECRET, "shhh");
    env::set_var(DATA_DIR, "");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
    clear_all();
}
