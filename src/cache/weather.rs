// ABOUTME: Weather cache service bundling the raw per-city and processed snapshot namespaces
// ABOUTME: Constructed once at startup and injected into the pipeline and status route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use super::{CacheConfig, CacheKey, InMemoryCache, NamespaceStats};
use crate::models::{CityId, RankedCity, RawWeatherObservation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The full ranked list, shared without copying between cache and responses
pub type ProcessedSnapshot = Arc<Vec<RankedCity>>;

/// Statistics for both namespaces, as served by the cache status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatusReport {
    /// Raw per-city observations
    pub raw: NamespaceStats,
    /// Processed ranked snapshot
    pub processed: NamespaceStats,
}

/// Two-layer weather cache
///
/// Both layers share one TTL but expire independently per key.
pub struct WeatherCache {
    raw: InMemoryCache<Arc<RawWeatherObservation>>,
    processed: InMemoryCache<ProcessedSnapshot>,
}

impl WeatherCache {
    /// Build both namespaces from one configuration
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            raw: InMemoryCache::new(config),
            processed: InMemoryCache::new(config),
        }
    }

    /// Cached observation for one city
    pub async fn get_raw(&self, city_id: CityId) -> Option<Arc<RawWeatherObservation>> {
        self.raw.get(&CacheKey::RawObservation { city_id }).await
    }

    /// Store one city's observation under the identifier it was requested by
    pub async fn set_raw(&self, city_id: CityId, observation: Arc<RawWeatherObservation>) {
        self.raw
            .set(&CacheKey::RawObservation { city_id }, observation)
            .await;
    }

    /// Current ranked snapshot, if one is live
    pub async fn get_processed(&self) -> Option<ProcessedSnapshot> {
        self.processed.get(&CacheKey::ProcessedSnapshot).await
    }

    /// Replace the ranked snapshot
    pub async fn set_processed(&self, snapshot: ProcessedSnapshot) {
        self.processed
            .set(&CacheKey::ProcessedSnapshot, snapshot)
            .await;
    }

    /// Drop the ranked snapshot so the next request recomputes it
    pub async fn invalidate_processed(&self) -> bool {
        self.processed.remove(&CacheKey::ProcessedSnapshot).await
    }

    /// Raw namespace
    #[must_use]
    pub const fn raw(&self) -> &InMemoryCache<Arc<RawWeatherObservation>> {
        &self.raw
    }

    /// Processed namespace
    #[must_use]
    pub const fn processed(&self) -> &InMemoryCache<ProcessedSnapshot> {
        &self.processed
    }

    /// Statistics for both namespaces
    pub async fn stats(&self) -> CacheStatusReport {
        CacheStatusReport {
            raw: self.raw.stats().await,
            processed: self.processed.stats().await,
        }
    }
}
