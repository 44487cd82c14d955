// ABOUTME: Closed error taxonomy for auth, rate limiting, HTTP, storage, and config failures
// ABOUTME: Callers match variants exhaustively; retry decisions come from the variant, never from message text
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Unified error handling for the sync and analytics pipeline.
//!
//! Every fallible library operation returns [`enum@Error`]. Behavior on failure
//! (retry, abort, operator guidance) is derived from the variant, so callers
//! never inspect message strings to classify an error.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Credential missing, rejected by the provider, or refresh denied.
    /// Fatal: the operator must re-run the authorization flow.
    #[error("authentication failed: {message}")]
    Auth {
        /// What went wrong with the credential
        message: String,
    },

    /// HTTP 429 from the provider. Never retried inline; the whole pipeline
    /// backs off instead of compounding against the shared request window.
    #[error("rate limit exceeded, provider asks to retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait, from the `Retry-After` response header
        retry_after_secs: u64,
    },

    /// Transport failure or 5xx response. The only retryable class.
    #[error("transient HTTP failure: {message}")]
    TransientHttp {
        /// Description of the transport or server failure
        message: String,
    },

    /// Non-429 4xx response. Retrying cannot help and wastes budget.
    #[error("client error {status}: {body}")]
    ClientHttp {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the provider
        body: String,
    },

    /// A file expected on disk was absent
    #[error("file not found: {path}")]
    NotFound {
        /// Path that was probed
        path: PathBuf,
    },

    /// A file existed but did not parse as the expected JSON shape
    #[error("corrupt JSON in {path}")]
    Corrupt {
        /// Path of the unparsable file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem operation failed
    #[error("storage error at {path}")]
    Storage {
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing or invalid environment configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider answered 2xx but the body was not the expected shape
    #[error("invalid response from provider: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Create an authentication error from a message
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a transient HTTP error from a message
    pub fn transient(message: impl Into<String>) -> Self {
        Self::TransientHttp {
            message: message.into(),
        }
    }

    /// Create a configuration error from a message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid response error from a message
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Whether the generic retry path may re-attempt the failed request.
    ///
    /// Only [`Error::TransientHttp`] qualifies: 4xx responses are not
    /// transient, and a 429 must back off the whole pipeline rather than
    /// retry a single call.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientHttp { .. })
    }

    /// Operator-facing remediation hint for the CLI, when one exists
    #[must_use]
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::Auth { .. } => {
                Some("Run `paceline auth` to complete the authorization flow, then retry.")
            }
            Self::RateLimited { .. } => {
                Some("Rate limit window exhausted. Wait before running sync again.")
            }
            Self::Config(_) => {
                Some("Check your environment variables; see `.env.example` for what is required.")
            }
            Self::NotFound { .. }
            | Self::Corrupt { .. }
            | Self::Storage { .. }
            | Self::TransientHttp { .. }
            | Self::ClientHttp { .. }
            | Self::InvalidResponse(_) => None,
        }
    }
}

// Transport-level reqwest failures (connect, timeout, body read) are transient
// by classification; HTTP status handling happens before this conversion.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::TransientHttp {
            message: err.to_string(),
        }
    }
}
