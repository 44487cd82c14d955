// ABOUTME: OAuth2 client implementation for Strava token endpoint requests
// ABOUTME: Builds the consent URL and performs code exchange and refresh grants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::config::StravaApiConfig;
use crate::constants::oauth;
use crate::errors::{Error, Result};
use crate::models::Credential;
use crate::utils::http_client::api_client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// HTTP client for the provider's OAuth token endpoint.
///
/// Carries no credential state of its own; persistence and expiry policy
/// live in [`crate::oauth2_client::TokenManager`].
pub struct OAuth2Client {
    config: StravaApiConfig,
    client: reqwest::Client,
}

/// Fields of the provider token response the pipeline keeps.
///
/// Strava reports expiry both as absolute `expires_at` and relative
/// `expires_in`; only the absolute form is stored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_at: i64,
}

impl OAuth2Client {
    /// Create a new client for the configured endpoints
    #[must_use]
    pub fn new(config: StravaApiConfig) -> Self {
        Self {
            config,
            client: api_client(),
        }
    }

    /// Build the consent URL the athlete must visit to authorize the app
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configured auth URL is malformed
    pub fn authorization_url(&self, redirect_uri: &str) -> Result<String> {
        let mut url = Url::parse(&self.config.auth_url)
            .map_err(|e| Error::config(format!("invalid auth URL {}: {e}", self.config.auth_url)))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", oauth::STRAVA_DEFAULT_SCOPES);

        Ok(url.to_string())
    }

    /// Exchange an authorization code for the initial credential
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the provider rejects the code,
    /// [`Error::TransientHttp`] on transport failure, and
    /// [`Error::InvalidResponse`] when a 2xx body does not parse
    pub async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let body = json!({
            "client_id": self.config.client_id,
            "client_secret": self.config.client_secret,
            "code": code,
            "grant_type": "authorization_code",
        });

        let response = self
            .client
            .post(&self.config.token_url)
            .json(&body)
            .send()
            .await?;

        parse_token_response(response, |status, text| {
            Error::auth(format!(
                "failed to exchange authorization code ({status}): {text}"
            ))
        })
        .await
    }

    /// Obtain a fresh credential from a refresh token.
    ///
    /// The returned credential carries a NEW refresh token; the caller must
    /// persist it before using the access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the provider rejects the refresh token,
    /// [`Error::TransientHttp`] on transport failure, and
    /// [`Error::InvalidResponse`] when a 2xx body does not parse
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Credential> {
        let body = json!({
            "client_id": self.config.client_id,
            "client_secret": self.config.client_secret,
            "grant_type": "refresh_token",
            "refresh_token": refresh_token,
        });

        let response = self
            .client
            .post(&self.config.token_url)
            .json(&body)
            .send()
            .await?;

        parse_token_response(response, |status, text| {
            Error::auth(format!(
                "failed to refresh access token ({status}): {text}. Your refresh \
                 token may be invalid; run `paceline auth` to re-authenticate"
            ))
        })
        .await
    }
}

/// Turn a token endpoint response into a [`Credential`], mapping non-2xx
/// statuses through `failure`
async fn parse_token_response(
    response: reqwest::Response,
    failure: impl FnOnce(u16, String) -> Error,
) -> Result<Credential> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(failure(status.as_u16(), text));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::invalid_response(format!("token endpoint body did not parse: {e}")))?;

    Ok(Credential {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expires_at: token.expires_at,
    })
}
