// ABOUTME: Two-layer TTL cache for raw provider observations and the processed ranked snapshot
// ABOUTME: Cache keys, configuration, and per-namespace statistics shared by both layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

/// Single-namespace in-memory TTL store with hit/miss accounting
pub mod memory;
/// The raw and processed namespaces bundled as one injectable service
pub mod weather;

pub use memory::InMemoryCache;
pub use weather::{CacheStatusReport, WeatherCache};

use crate::constants::cache::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_CHECK_PERIOD_SECS, PROCESSED_SNAPSHOT_KEY, RAW_KEY_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Lifetime of every entry, measured from its last `set`
    pub ttl: Duration,
    /// Interval between active sweeps of expired entries
    pub check_period: Duration,
    /// Enable background sweep task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            check_period: Duration::from_secs(DEFAULT_CHECK_PERIOD_SECS),
            // Tests can explicitly disable by setting to false
            enable_background_cleanup: true,
        }
    }
}

/// Structured cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// One city's provider observation, rendered `raw_<cityId>`
    RawObservation {
        /// Provider city identifier
        city_id: u64,
    },
    /// The single ranked snapshot of every city
    ProcessedSnapshot,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawObservation { city_id } => write!(f, "{RAW_KEY_PREFIX}{city_id}"),
            Self::ProcessedSnapshot => f.write_str(PROCESSED_SNAPSHOT_KEY),
        }
    }
}

/// Point-in-time statistics for one namespace
///
/// `hits` and `misses` only ever grow for the lifetime of the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Live keys, sorted
    pub keys: Vec<String>,
    /// Number of live keys
    pub keys_count: usize,
    /// Configured TTL
    pub ttl_seconds: u64,
}
