// ABOUTME: Configuration management module for pipeline settings and credentials
// ABOUTME: Exposes the environment-derived application config passed into all components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! Configuration is read from the environment exactly once, at process start,
//! into an explicit [`AppConfig`] that is passed by reference into component
//! constructors. Components never read ambient state themselves, which keeps
//! them testable against fixture credentials and temp directories.

/// Environment-derived application configuration
pub mod environment;

pub use environment::{AnalyticsConfig, AppConfig, StorageConfig, StravaApiConfig};
