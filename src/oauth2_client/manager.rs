// ABOUTME: Credential lifecycle management with proactive refresh and rotation persistence
// ABOUTME: Loads the stored credential, refreshes ahead of expiry, and saves rotated tokens immediately
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::config::AppConfig;
use crate::constants::oauth;
use crate::errors::{Error, Result};
use crate::models::Credential;
use crate::oauth2_client::OAuth2Client;
use crate::storage;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, info};

/// Owns the stored credential and keeps it usable.
///
/// Refresh is proactive only: a token within one hour of expiry is refreshed
/// before it is handed out, and a 401 at request time is never used as a
/// refresh trigger. Because Strava rotates the refresh token on every
/// refresh, the new credential hits disk before the access token is
/// returned; handing out a token whose rotated sibling was lost would
/// permanently break the pipeline on the next run.
pub struct TokenManager {
    tokens_path: PathBuf,
    client: OAuth2Client,
}

impl TokenManager {
    /// Create a manager bound to the configured credential file and endpoints
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            tokens_path: config.storage.tokens_path(),
            client: OAuth2Client::new(config.api.clone()),
        }
    }

    /// Return an access token that is valid for at least the refresh margin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when no credential exists or the provider
    /// rejects the refresh, [`Error::Corrupt`] when the credential file does
    /// not parse, and storage or transport errors as classified.
    pub async fn get_valid_access_token(&self) -> Result<String> {
        let credential = self.load().await?;
        let now = Utc::now();

        if credential.expires_within(oauth::TOKEN_REFRESH_THRESHOLD_SECS, now) {
            info!(
                expires_in_secs = credential.seconds_until_expiry(now),
                "Access token expiring soon, refreshing proactively"
            );
            let refreshed = self.refresh(&credential.refresh_token).await?;
            return Ok(refreshed.access_token);
        }

        debug!(
            expires_in_secs = credential.seconds_until_expiry(now),
            "Access token still valid"
        );
        Ok(credential.access_token)
    }

    /// Refresh the credential and persist the rotated tokens immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the provider rejects the refresh token.
    /// A refresh failure is fatal; it is never retried silently.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential> {
        let credential = self.client.refresh_token(refresh_token).await?;
        self.save(&credential).await?;
        info!(
            expires_at = credential.expires_at,
            "Refreshed access token and persisted rotated refresh token"
        );
        Ok(credential)
    }

    /// Exchange an authorization code and persist the initial credential.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the provider rejects the code.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let credential = self.client.exchange_code(code).await?;
        self.save(&credential).await?;
        info!(
            expires_at = credential.expires_at,
            "Authorization code exchanged, credential saved"
        );
        Ok(credential)
    }

    /// Consent URL for the one-time authorization flow
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configured auth URL is malformed
    pub fn authorization_url(&self, redirect_uri: &str) -> Result<String> {
        self.client.authorization_url(redirect_uri)
    }

    async fn load(&self) -> Result<Credential> {
        match storage::read_json(&self.tokens_path).await {
            Ok(credential) => Ok(credential),
            Err(Error::NotFound { path }) => Err(Error::auth(format!(
                "no credential found at {}. Complete the OAuth flow first: run `paceline auth`",
                path.display()
            ))),
            Err(e) => Err(e),
        }
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        storage::write_json(&self.tokens_path, credential).await
    }
}
