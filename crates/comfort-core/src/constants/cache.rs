// ABOUTME: Cache-related constants for TTL, sweep interval, and key naming
// ABOUTME: Shared by the raw observation and processed snapshot namespaces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

/// Default TTL for both cache namespaces
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes

/// Default interval between active sweeps of expired entries
pub const DEFAULT_CHECK_PERIOD_SECS: u64 = 60;

/// Key prefix for raw per-city observations (`raw_<cityId>`)
pub const RAW_KEY_PREFIX: &str = "raw_";

/// Singleton key of the processed ranked snapshot
pub const PROCESSED_SNAPSHOT_KEY: &str = "all_cities_processed";

/// Upper bound accepted for the TTL and the sweep period (24 hours)
pub const MAX_CACHE_DURATION_SECS: u64 = 86_400;
