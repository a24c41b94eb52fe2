// ABOUTME: Integration tests for the aggregation pipeline over a scripted provider
// ABOUTME: Covers partial failure, ranking, both cache layers, and the empty-snapshot policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use comfort_index_server::cache::{CacheConfig, WeatherCache};
use comfort_index_server::models::CityId;
use comfort_index_server::services::{CityAggregator, EmptySnapshotPolicy};
use helpers::scripted_provider::{ideal_observation, observation, ScriptedProvider};
use std::sync::Arc;
use std::time::Duration;

const COLOMBO: CityId = 1_248_991;
const TOKYO: CityId = 1_850_147;
const LIVERPOOL: CityId = 2_644_210;
const PARIS: CityId = 2_988_507;
const SYDNEY: CityId = 2_147_714;

fn cache() -> Arc<WeatherCache> {
    Arc::new(WeatherCache::new(&CacheConfig {
        ttl: Duration::from_secs(300),
        check_period: Duration::from_secs(60),
        enable_background_cleanup: false,
    }))
}

fn five_city_provider() -> ScriptedProvider {
    ScriptedProvider::new()
        .with_observation(observation(COLOMBO, "Colombo", 30.0, 74.0, 4.1, 75.0))
        .with_observation(ideal_observation(TOKYO, "Tokyo"))
        .with_observation(observation(LIVERPOOL, "Liverpool", 9.0, 87.0, 7.2, 90.0))
        .with_observation(observation(PARIS, "Paris", 17.0, 55.0, 2.0, 10.0))
        .with_observation(observation(SYDNEY, "Sydney", 26.0, 65.0, 5.5, 40.0))
}

const ALL: [CityId; 5] = [COLOMBO, TOKYO, LIVERPOOL, PARIS, SYDNEY];

#[tokio::test]
async fn test_ranks_every_city_by_descending_score() {
    let provider = Arc::new(five_city_provider());
    let aggregator = CityAggregator::new(cache(), provider.clone());

    let outcome = aggregator.fetch_all_cities(&ALL).await;

    assert!(!outcome.processed_cache_hit);
    assert_eq!(outcome.cities.len(), 5);
    assert_eq!(outcome.cities[0].id, TOKYO);
    assert!((outcome.cities[0].comfort_score - 100.0).abs() < f64::EPSILON);
    assert_eq!(outcome.cities[4].id, LIVERPOOL);

    for (index, city) in outcome.cities.iter().enumerate() {
        assert_eq!(city.rank, index + 1);
        assert!(!city.raw_cache_hit);
        assert!((0.0..=100.0).contains(&city.comfort_score));
    }
    for pair in outcome.cities.windows(2) {
        assert!(pair[0].comfort_score >= pair[1].comfort_score);
    }
    assert_eq!(provider.call_count(), 5);
}

#[tokio::test]
async fn test_failed_cities_are_dropped_and_ranks_stay_contiguous() {
    let provider = Arc::new(
        five_city_provider()
            .with_status(PARIS, 500)
            .with_malformed(COLOMBO),
    );
    let aggregator = CityAggregator::new(cache(), provider.clone());

    let outcome = aggregator.fetch_all_cities(&ALL).await;

    let ids: Vec<CityId> = outcome.cities.iter().map(|c| c.id).collect();
    assert_eq!(outcome.cities.len(), 3);
    assert!(!ids.contains(&PARIS));
    assert!(!ids.contains(&COLOMBO));
    let ranks: Vec<usize> = outcome.cities.iter().map(|c| c.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    // Failures are not stored in the raw layer
    let report = aggregator.cache().stats().await;
    assert_eq!(report.raw.keys_count, 3);
    assert!(!report.raw.keys.contains(&format!("raw_{PARIS}")));
}

#[tokio::test]
async fn test_unknown_city_is_dropped() {
    let provider = Arc::new(five_city_provider());
    let aggregator = CityAggregator::new(cache(), provider);

    let outcome = aggregator.fetch_all_cities(&[TOKYO, 999_999_999]).await;

    assert_eq!(outcome.cities.len(), 1);
    assert_eq!(outcome.cities[0].id, TOKYO);
}

#[tokio::test]
async fn test_second_call_serves_processed_snapshot() {
    let provider = Arc::new(five_city_provider());
    let aggregator = CityAggregator::new(cache(), provider.clone());

    let first = aggregator.fetch_all_cities(&ALL).await;
    let second = aggregator.fetch_all_cities(&ALL).await;

    assert!(!first.processed_cache_hit);
    assert!(second.processed_cache_hit);
    assert!(Arc::ptr_eq(&first.cities, &second.cities));
    assert_eq!(provider.call_count(), 5);

    let report = aggregator.cache().stats().await;
    assert_eq!(report.processed.hits, 1);
    assert_eq!(report.processed.misses, 1);
}

#[tokio::test]
async fn test_recompute_reuses_raw_observations() {
    let provider = Arc::new(five_city_provider());
    let aggregator = CityAggregator::new(cache(), provider.clone());

    aggregator.fetch_all_cities(&ALL).await;
    assert!(aggregator.cache().invalidate_processed().await);
    let outcome = aggregator.fetch_all_cities(&ALL).await;

    assert!(!outcome.processed_cache_hit);
    assert!(outcome.cities.iter().all(|c| c.raw_cache_hit));
    assert_eq!(provider.call_count(), 5);
    assert_eq!(provider.calls_for(TOKYO), 1);
}

#[tokio::test]
async fn test_raw_failure_is_retried_on_next_run() {
    let provider = Arc::new(five_city_provider().with_status(SYDNEY, 503));
    let aggregator = CityAggregator::new(cache(), provider.clone());

    aggregator.fetch_all_cities(&ALL).await;
    aggregator.cache().invalidate_processed().await;
    aggregator.fetch_all_cities(&ALL).await;

    assert_eq!(provider.calls_for(SYDNEY), 2);
    assert_eq!(provider.calls_for(TOKYO), 1);
}

#[tokio::test]
async fn test_equal_scores_keep_catalog_order() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_observation(ideal_observation(PARIS, "Paris"))
            .with_observation(ideal_observation(TOKYO, "Tokyo"))
            .with_observation(ideal_observation(SYDNEY, "Sydney")),
    );
    let aggregator = CityAggregator::new(cache(), provider);

    let outcome = aggregator.fetch_all_cities(&[SYDNEY, PARIS, TOKYO]).await;

    let ids: Vec<CityId> = outcome.cities.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![SYDNEY, PARIS, TOKYO]);
}

#[tokio::test]
async fn test_fetches_run_concurrently() {
    let provider = Arc::new(five_city_provider().with_delay(Duration::from_millis(200)));
    let aggregator = CityAggregator::new(cache(), provider);

    let started = std::time::Instant::now();
    let outcome = aggregator.fetch_all_cities(&ALL).await;

    assert_eq!(outcome.cities.len(), 5);
    assert!(started.elapsed() < Duration::from_millis(800));
}

#[tokio::test]
async fn test_all_failed_run_caches_empty_snapshot_by_default() {
    let provider = Arc::new(ScriptedProvider::new());
    let aggregator = CityAggregator::new(cache(), provider.clone());
    assert_eq!(aggregator.empty_snapshot_policy(), EmptySnapshotPolicy::CacheEmpty);

    let first = aggregator.fetch_all_cities(&ALL).await;
    let second = aggregator.fetch_all_cities(&ALL).await;

    assert!(first.cities.is_empty());
    assert!(second.processed_cache_hit);
    assert!(second.cities.is_empty());
    assert_eq!(provider.call_count(), 5);
}

#[tokio::test]
async fn test_all_failed_run_with_bypass_policy_retries() {
    let provider = Arc::new(ScriptedProvider::new());
    let aggregator = CityAggregator::new(cache(), provider.clone())
        .with_empty_snapshot_policy(EmptySnapshotPolicy::Bypass);

    aggregator.fetch_all_cities(&ALL).await;
    let second = aggregator.fetch_all_cities(&ALL).await;

    assert!(!second.processed_cache_hit);
    assert_eq!(provider.call_count(), 10);
    assert_eq!(aggregator.cache().stats().await.processed.keys_count, 0);
}
