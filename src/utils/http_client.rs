// ABOUTME: HTTP client constructors with explicit request and connect timeouts
// ABOUTME: Used by the weather provider client and the signing key fetcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use crate::errors::{AppError, AppResult};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// User agent sent on every outbound request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Create a new HTTP client with custom timeout settings
///
/// # Arguments
/// * `timeout` - Whole-request timeout
/// * `connect_timeout` - Connection establishment timeout
///
/// # Errors
///
/// Returns an internal error when the builder fails, which only happens
/// when the TLS backend cannot initialize. There is no untimed fallback.
pub fn create_client_with_timeout(
    timeout: Duration,
    connect_timeout: Duration,
) -> AppResult<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout.min(timeout))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))
}

/// Client for short control-plane fetches such as signing key sets
///
/// # Errors
///
/// Propagates a client builder failure
pub fn key_fetch_client() -> AppResult<Client> {
    create_client_with_timeout(Duration::from_secs(10), Duration::from_secs(5)) // 10s request, 5s connect
}
