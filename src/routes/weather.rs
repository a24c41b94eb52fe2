// ABOUTME: Ranked weather route returning every catalog city ordered by comfort score
// ABOUTME: Delegates to the aggregation pipeline and reports whether the snapshot came from cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::iso_timestamp;
use crate::cache::weather::ProcessedSnapshot;
use crate::constants::endpoints;
use crate::models::RankedCity;
use crate::resources::ServerResources;

/// Ranked weather body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    /// Always true; per-city failures only shorten `data`
    pub success: bool,
    /// Whether the processed snapshot was served from cache
    pub cache_hit: bool,
    /// Number of ranked cities
    pub count: usize,
    /// ISO-8601 response time
    pub last_updated: String,
    /// Ranked cities, best first
    #[serde(serialize_with = "serialize_snapshot")]
    pub data: ProcessedSnapshot,
}

fn serialize_snapshot<S>(snapshot: &ProcessedSnapshot, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    <[RankedCity] as Serialize>::serialize(snapshot.as_slice(), serializer)
}

/// Weather routes implementation
pub struct WeatherRoutes;

impl WeatherRoutes {
    /// Create the ranked weather route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::WEATHER, get(Self::handle_get_weather))
            .with_state(resources)
    }

    async fn handle_get_weather(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<WeatherResponse> {
        let outcome = resources
            .aggregator
            .fetch_all_cities(resources.catalog.ids())
            .await;

        Json(WeatherResponse {
            success: true,
            cache_hit: outcome.processed_cache_hit,
            count: outcome.cities.len(),
            last_updated: iso_timestamp(),
            data: outcome.cities,
        })
    }
}
