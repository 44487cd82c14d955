// ABOUTME: Strava API integration and activity page fetching
// ABOUTME: Applies bearer auth, request budget, retry classification, and response logging
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::constants::limits;
use crate::errors::{Error, Result};
use crate::models::Activity;
use crate::oauth2_client::TokenManager;
use crate::providers::{ActivityProvider, RateLimiter, RetryPolicy};
use crate::utils::http_client::api_client;

/// Rate-limited Strava client.
///
/// Every page fetch goes through three layers: a fresh access token from
/// the [`TokenManager`], an admission slot from the [`RateLimiter`], and
/// the [`RetryPolicy`] for transient failures. The token is obtained once
/// per page, before the retry loop, so a refresh is never silently repeated
/// by a retry.
pub struct StravaProvider {
    base_url: String,
    token_manager: TokenManager,
    rate_limiter: RateLimiter,
    retry: RetryPolicy,
    client: Client,
}

impl StravaProvider {
    /// Create a provider wired to the configured endpoints and credential
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            token_manager: TokenManager::new(config),
            rate_limiter: RateLimiter::for_strava(),
            retry: RetryPolicy::default(),
            client: api_client(),
        }
    }
}

#[async_trait]
impl ActivityProvider for StravaProvider {
    async fn get_activities(
        &self,
        after: Option<i64>,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Activity>> {
        let token = self.token_manager.get_valid_access_token().await?;
        let url = format!("{}/athlete/activities", self.base_url);

        let mut query = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        info!(page, per_page, after = ?after, "Fetching activities page from Strava");

        self.retry
            .execute("Strava activities fetch", || {
                let request = self.client.get(&url).bearer_auth(&token).query(&query);
                let limiter = &self.rate_limiter;
                async move {
                    let _slot = limiter.acquire().await;
                    let response = request.send().await?;
                    handle_activities_response(response).await
                }
            })
            .await
    }

    fn provider_name(&self) -> &'static str {
        "strava"
    }
}

/// Classify a response from the activities endpoint and parse the page
async fn handle_activities_response(response: reqwest::Response) -> Result<Vec<Activity>> {
    log_rate_limit_headers(&response);
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(limits::DEFAULT_RETRY_AFTER_SECS);
        warn!(retry_after_secs, "Provider read rate limit exceeded");
        return Err(Error::RateLimited { retry_after_secs });
    }

    if status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::transient(format!("server error {status}: {body}")));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), "Strava rejected request: {body}");
        return Err(Error::ClientHttp {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<Vec<Activity>>()
        .await
        .map_err(|e| Error::invalid_response(format!("activities page did not parse: {e}")))
}

/// Surface the provider's own budget accounting next to ours
fn log_rate_limit_headers(response: &reqwest::Response) {
    let limit = header_value(response, "X-ReadRateLimit-Limit");
    let usage = header_value(response, "X-ReadRateLimit-Usage");
    if let (Some(limit), Some(usage)) = (limit, usage) {
        info!(usage = %usage, limit = %limit, "Strava read rate budget");
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
