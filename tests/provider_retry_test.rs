// ABOUTME: Integration tests for the Strava provider against a mock API server
// ABOUTME: Validates bearer auth, pagination params, retry classification, and rate limit handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::Utc;
use paceline::config::{AnalyticsConfig, AppConfig, StorageConfig, StravaApiConfig};
use paceline::errors::Error;
use paceline::models::Credential;
use paceline::providers::{ActivityProvider, StravaProvider};
use paceline::storage;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn provider_for(server: &MockServer, temp_dir: &TempDir) -> Result<StravaProvider> {
    let server_uri = server.uri();
    let config = AppConfig {
        api: StravaApiConfig {
            client_id: "163846".to_owned(),
            client_secret: "shhh".to_owned(),
            base_url: format!("{server_uri}/api/v3"),
            auth_url: format!("{server_uri}/oauth/authorize"),
            token_url: format!("{server_uri}/oauth/token"),
        },
        storage: StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
        },
        analytics: AnalyticsConfig::default(),
    };

    // Credential far from expiry so no refresh traffic competes with the
    // activities mocks
    let credential = Credential {
        access_token: "stored-access".to_owned(),
        refresh_token: "stored-refresh".to_owned(),
        expires_at: Utc::now().timestamp() + 7200,
    };
    storage::write_json(&config.storage.tokens_path(), &credential).await?;

    Ok(StravaProvider::new(&config))
}

fn activities_body() -> serde_json::Value {
    json!([
        {
            "id": 101,
            "name": "Morning Run",
            "type": "Run",
            "start_date": "2024-03-10T06:45:00Z",
            "start_date_local": "2024-03-10T07:45:00Z",
            "distance": 8012.3,
            "moving_time": 2400,
            "elapsed_time": 2460,
            "total_elevation_gain": 55.0
        },
        {
            "id": 102,
            "name": "Evening Ride",
            "type": "Ride",
            "start_date": "2024-03-10T18:00:00Z",
            "distance": 25_000.0,
            "moving_time": 3600,
            "elapsed_time": 3700
        }
    ])
}

#[tokio::test]
async fn test_page_fetch_sends_bearer_and_pagination_params() -> Result<()> {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new()?;
    let provider = provider_for(&server, &temp_dir).await?;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(header("Authorization", "Bearer stored-access"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(activities_body()))
        .expect(1)
        .mount(&server)
        .await;

    let activities = provider.get_activities(None, 1, 200).await?;
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].id, 101);
    assert!(activities[0].is_run());
    assert_eq!(activities[1].activity_type, "Ride");
    assert_eq!(provider.provider_name(), "strava");
    Ok(())
}

#[tokio::test]
async fn test_incremental_fetch_includes_after_param() -> Result<()> {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new()?;
    let provider = provider_for(&server, &temp_dir).await?;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(query_param("after", "1700000000"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let activities = provider.get_activities(Some(1_700_000_000), 3, 200).await?;
    assert!(activities.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_server_errors_retried_to_exhaustion() -> Result<()> {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new()?;
    let provider = provider_for(&server, &temp_dir).await?;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(3)
        .mount(&server)
        .await;

    let result = provider.get_activities(None, 1, 200).await;
    assert!(matches!(result, Err(Error::TransientHttp { .. })));
    Ok(())
}

#[tokio::test]
async fn test_client_error_fails_without_retry() -> Result<()> {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new()?;
    let provider = provider_for(&server, &temp_dir).await?;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such athlete"))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider.get_activities(None, 1, 200).await;
    match result {
        Err(Error::ClientHttp { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such athlete");
        }
        other => panic!("expected ClientHttp, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_rate_limit_surfaces_retry_after_without_retry() -> Result<()> {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new()?;
    let provider = provider_for(&server, &temp_dir).await?;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "123"))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider.get_activities(None, 1, 200).await;
    match result {
        Err(Error::RateLimited { retry_after_secs }) => assert_eq!(retry_after_secs, 123),
        other => panic!("expected RateLimited, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_rate_limit_defaults_when_header_absent() -> Result<()> {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new()?;
    let provider = provider_for(&server, &temp_dir).await?;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider.get_activities(None, 1, 200).await;
    match result {
        Err(Error::RateLimited { retry_after_secs }) => assert_eq!(retry_after_secs, 60),
        other => panic!("expected RateLimited, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_unparseable_success_body_is_invalid_response() -> Result<()> {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new()?;
    let provider = provider_for(&server, &temp_dir).await?;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login page</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider.get_activities(None, 1, 200).await;
    assert!(matches!(result, Err(Error::InvalidResponse(_))));
    Ok(())
}
