// ABOUTME: Aggregation pipeline turning per-city provider observations into a cached ranked snapshot
// ABOUTME: Concurrent settle-all fan-out; failed cities are logged and dropped, never surfaced
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

//! # Aggregation Pipeline
//!
//! One run of [`CityAggregator::fetch_all_cities`]:
//!
//! 1. Return the processed snapshot if it is live. No partial reuse.
//! 2. Fetch every city concurrently, raw cache first, provider on a miss.
//! 3. Wait for every fetch. A failure drops that city only.
//! 4. Score each observation and flatten it into a [`RankedCity`].
//! 5. Sort by comfort score descending and assign 1-based ranks.
//! 6. Store the snapshot, subject to [`EmptySnapshotPolicy`].
//!
//! Ties keep catalog order: the join yields results in input order and the
//! sort is stable. That order carries no meaning.

use crate::cache::weather::ProcessedSnapshot;
use crate::cache::WeatherCache;
use crate::models::{CityId, RankedCity, RawWeatherObservation};
use crate::providers::{ProviderError, WeatherProvider};
use comfort_intelligence::ComfortIndexCalculator;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What to do with a run in which every city failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySnapshotPolicy {
    /// Store the empty snapshot for the full TTL
    #[default]
    CacheEmpty,
    /// Skip storing so the next request retries the provider
    Bypass,
}

impl EmptySnapshotPolicy {
    /// Whether `snapshot` should be written to the processed cache
    #[must_use]
    pub fn should_store(self, snapshot: &[RankedCity]) -> bool {
        !snapshot.is_empty() || self == Self::CacheEmpty
    }
}

/// Result of one `fetch_all_cities` call
#[derive(Debug, Clone)]
pub struct AggregationOutcome {
    /// Ranked cities, best first
    pub cities: ProcessedSnapshot,
    /// Whether the processed snapshot was served from cache
    pub processed_cache_hit: bool,
}

/// Pipeline over an injected cache and provider
#[derive(Clone)]
pub struct CityAggregator {
    cache: Arc<WeatherCache>,
    provider: Arc<dyn WeatherProvider>,
    empty_snapshot_policy: EmptySnapshotPolicy,
}

impl CityAggregator {
    /// Create a pipeline with the default empty-snapshot policy
    #[must_use]
    pub fn new(cache: Arc<WeatherCache>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            cache,
            provider,
            empty_snapshot_policy: EmptySnapshotPolicy::default(),
        }
    }

    /// Override the empty-snapshot policy
    #[must_use]
    pub fn with_empty_snapshot_policy(mut self, policy: EmptySnapshotPolicy) -> Self {
        self.empty_snapshot_policy = policy;
        self
    }

    /// Active empty-snapshot policy
    #[must_use]
    pub const fn empty_snapshot_policy(&self) -> EmptySnapshotPolicy {
        self.empty_snapshot_policy
    }

    /// Shared cache
    #[must_use]
    pub const fn cache(&self) -> &Arc<WeatherCache> {
        &self.cache
    }

    /// Produce the ranked snapshot for `city_ids`
    ///
    /// Never fails: per-city errors shorten the list instead.
    #[tracing::instrument(skip_all, fields(requested = city_ids.len()))]
    pub async fn fetch_all_cities(&self, city_ids: &[CityId]) -> AggregationOutcome {
        if let Some(cities) = self.cache.get_processed().await {
            debug!(count = cities.len(), "Serving processed snapshot from cache");
            return AggregationOutcome {
                cities,
                processed_cache_hit: true,
            };
        }

        let started = Instant::now();
        let results = join_all(city_ids.iter().map(|&city_id| self.fetch_city(city_id))).await;

        let mut cities = Vec::with_capacity(results.len());
        let mut failed = 0_usize;
        for result in results {
            match result {
                Ok((observation, raw_cache_hit)) => {
                    let comfort = ComfortIndexCalculator::compute(&observation.reading());
                    cities.push(RankedCity::assemble(&observation, &comfort, raw_cache_hit));
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        city_id = e.city_id(),
                        kind = e.kind(),
                        provider = self.provider.name(),
                        "Failed to fetch city, dropping it from this run: {}",
                        e
                    );
                }
            }
        }

        rank_cities(&mut cities);
        let snapshot: ProcessedSnapshot = Arc::new(cities);

        if self.empty_snapshot_policy.should_store(&snapshot) {
            self.cache.set_processed(Arc::clone(&snapshot)).await;
        } else {
            warn!("Every city fetch failed; empty snapshot not cached");
        }

        info!(
            requested = city_ids.len(),
            succeeded = snapshot.len(),
            failed,
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            processed_cache_hit = false,
            "Aggregation run complete"
        );

        AggregationOutcome {
            cities: snapshot,
            processed_cache_hit: false,
        }
    }

    /// One city: raw cache, then provider, storing what the provider returns
    async fn fetch_city(
        &self,
        city_id: CityId,
    ) -> Result<(Arc<RawWeatherObservation>, bool), ProviderError> {
        if let Some(observation) = self.cache.get_raw(city_id).await {
            return Ok((observation, true));
        }

        let observation = Arc::new(self.provider.fetch_current(city_id).await?);
        self.cache.set_raw(city_id, Arc::clone(&observation)).await;
        Ok((observation, false))
    }
}

/// Sort by comfort score descending and assign 1-based ranks
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn rank_cities(cities: &mut [RankedCity]) {
    cities.sort_by(|a, b| b.comfort_score.total_cmp(&a.comfort_score));
    for (index, city) in cities.iter_mut().enumerate() {
        city.rank = index + 1;
    }
}
