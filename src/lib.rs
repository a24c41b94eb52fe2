// ABOUTME: Main library entry point for the Comfort Index API server
// ABOUTME: Ranks cities by current weather comfort behind a bearer-authenticated HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

#![deny(unsafe_code)]

//! # Comfort Index Server
//!
//! Fetches current weather for a fixed catalog of cities, scores each city's
//! comfort from 0 to 100, ranks them, and serves the ranking over HTTP.
//!
//! ## Architecture
//!
//! - **Providers**: weather sources behind the `WeatherProvider` trait
//! - **Cache**: raw per-city observations and the processed ranked snapshot, both TTL-bound
//! - **Services**: the aggregation pipeline (fan-out, scoring, ranking)
//! - **Routes**: `/health`, `/api/weather`, `/api/cache/status`
//! - **Auth**: RS256 bearer token validation for the `/api` routes
//!
//! Scoring itself lives in the `comfort-intelligence` crate; errors and
//! constants come from `comfort-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use comfort_index_server::config::ServerConfig;
//! use comfort_index_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Comfort Index server configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Bearer token validation
pub mod auth;

/// Two-layer TTL weather cache
pub mod cache;

/// City catalog loading
pub mod cities;

/// Environment-driven configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Weather observation and ranked city records
pub mod models;

/// Weather provider trait and implementations
pub mod providers;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Server lifecycle
pub mod server;

/// Domain services
pub mod services;

/// Shared utilities
pub mod utils;

pub use comfort_core::{constants, errors};
