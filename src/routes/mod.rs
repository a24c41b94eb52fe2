// ABOUTME: Route module organization for the comfort index HTTP API
// ABOUTME: Assembles public and bearer-protected routes, the 404 fallback, and the tower-http layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

//! Route module for the comfort index server
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the pipeline or the cache service.

/// Cache statistics routes
pub mod cache;
/// Health check routes
pub mod health;
/// Ranked weather routes
pub mod weather;

pub use cache::CacheRoutes;
pub use health::HealthRoutes;
pub use weather::WeatherRoutes;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{middleware, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{make_request_span, request_id_layers, require_bearer_token, setup_cors};
use crate::resources::ServerResources;

/// Current time as an ISO-8601 UTC timestamp with millisecond precision
#[must_use]
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let protected = Router::new()
        .merge(WeatherRoutes::routes(Arc::clone(resources)))
        .merge(CacheRoutes::routes(Arc::clone(resources)))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&resources.jwt_validator),
            require_bearer_token,
        ));

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(protected)
        .fallback(handle_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id)
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
                .layer(propagate_request_id)
                .layer(setup_cors(&resources.config)),
        )
}

/// Fallback for any unmatched method or path
async fn handle_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
