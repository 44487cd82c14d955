// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for the paceline CLI
// ABOUTME: Provides auth, sync, status, and stats command implementations

pub mod auth;
pub mod stats;
pub mod status;
pub mod sync;
