// ABOUTME: Shared HTTP client utilities with connection pooling and timeout configuration
// ABOUTME: Provides configurable HTTP clients to eliminate redundant client creation

use crate::constants::limits;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a new HTTP client with custom timeout settings
///
/// Use this when you need specific timeout configurations
/// that differ from the API client defaults.
///
/// # Arguments
/// * `timeout` - Request timeout
/// * `connect_timeout` - Connection timeout
///
/// # Returns
/// A new `reqwest::Client` with custom timeouts
///
/// # Errors
/// Returns a default client if custom client creation fails
#[must_use]
pub fn create_client_with_timeout(timeout: Duration, connect_timeout: Duration) -> Client {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a new HTTP client for provider API calls
///
/// Uses the standard request and connect timeouts for external API calls.
///
/// # Returns
/// A new `reqwest::Client` configured for API operations
#[must_use]
pub fn api_client() -> Client {
    create_client_with_timeout(limits::HTTP_TIMEOUT, limits::HTTP_CONNECT_TIMEOUT)
}
