// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for caching, provider access, and comfort scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Cache-related constants (TTL, sweep period, key names)
pub mod cache;
/// Comfort index scoring bands, penalties, and weights
pub mod comfort;
/// Weather provider constants (endpoints, timeouts)
pub mod provider;

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// API base path
    pub const API_BASE: &str = "/api";
    /// Ranked weather snapshot
    pub const WEATHER: &str = "/api/weather";
    /// Cache statistics
    pub const CACHE_STATUS: &str = "/api/cache/status";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Server binary and log service name
    pub const COMFORT_INDEX_SERVER: &str = "comfort-index-server";
}

/// Defaults for environment-driven configuration
pub mod env_defaults {
    /// Allowed CORS origin when `FRONTEND_URL` is unset
    pub const FRONTEND_URL: &str = "http://localhost:5173";
    /// Environment name when neither `ENVIRONMENT` nor `NODE_ENV` is set
    pub const ENVIRONMENT: &str = "development";
}

/// HTTP header names
pub mod headers {
    /// Request correlation header
    pub const REQUEST_ID: &str = "x-request-id";
    /// Bearer scheme prefix in `Authorization`
    pub const BEARER_PREFIX: &str = "Bearer ";
}
