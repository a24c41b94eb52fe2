// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Unauthenticated liveness endpoint returning status and timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::iso_timestamp;
use crate::constants::endpoints;

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "OK" while the process serves requests
    pub status: String,
    /// ISO-8601 response time
    pub timestamp: String,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes() -> Router {
        Router::new().route(endpoints::HEALTH_CHECK, get(Self::handle_health))
    }

    async fn handle_health() -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "OK".to_owned(),
            timestamp: iso_timestamp(),
        })
    }
}
