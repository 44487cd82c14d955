// ABOUTME: OAuth 2.0 client module for the Strava authorization-code flow
// ABOUTME: Provides code exchange, proactive token refresh, and rotation-safe persistence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # OAuth 2.0 Client Module
//!
//! The pipeline acts as an OAuth 2.0 client for a single athlete's Strava
//! account. This module handles:
//! - The one-time authorization-code exchange during setup
//! - Proactive access-token refresh ahead of expiry
//! - Persisting the rotated refresh token before the new access token is
//!   handed out (Strava invalidates the old one on every refresh)

/// Token endpoint HTTP client
pub mod client;
/// Credential lifecycle management
pub mod manager;

pub use client::OAuth2Client;
pub use manager::TokenManager;
