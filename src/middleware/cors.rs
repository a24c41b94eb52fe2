// ABOUTME: CORS middleware configuration for the dashboard client
// ABOUTME: Allows a single configured frontend origin to issue GET requests with a bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::ServerConfig;

/// Configure CORS for the dashboard
///
/// # Security Considerations
///
/// - Exactly one origin, `FRONTEND_URL`, is allowed
/// - Only `GET` and preflight `OPTIONS` are permitted
/// - Only the `Authorization` and `Content-Type` request headers are allowed
///
/// An origin that is not a valid header value allows no cross-origin requests.
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(config.frontend_url.trim_end_matches('/')) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            warn!(error = %e, "FRONTEND_URL is not a valid origin; cross-origin requests disabled");
            AllowOrigin::predicate(|_, _| false)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
