// ABOUTME: Cache status route exposing hit, miss, and key statistics for both namespaces
// ABOUTME: Read-only diagnostics; never mutates the cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::iso_timestamp;
use crate::cache::CacheStatusReport;
use crate::constants::endpoints;
use crate::resources::ServerResources;

/// Cache status body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatusResponse {
    /// Always true
    pub success: bool,
    /// ISO-8601 response time
    pub timestamp: String,
    /// Per-namespace statistics
    pub cache: CacheStatusReport,
}

/// Cache routes implementation
pub struct CacheRoutes;

impl CacheRoutes {
    /// Create the cache status route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::CACHE_STATUS, get(Self::handle_cache_status))
            .with_state(resources)
    }

    async fn handle_cache_status(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<CacheStatusResponse> {
        Json(CacheStatusResponse {
            success: true,
            timestamp: iso_timestamp(),
            cache: resources.cache.stats().await,
        })
    }
}
