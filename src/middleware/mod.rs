// ABOUTME: HTTP middleware for request tracing, bearer authentication, and CORS
// ABOUTME: Provides request ID propagation, request spans, and the JWT gate for /api routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

/// Bearer token gate
pub mod auth;
/// CORS configuration
pub mod cors;
/// Request IDs and request spans
pub mod tracing;

pub use auth::{extract_bearer_token, require_bearer_token};
pub use cors::setup_cors;
pub use self::tracing::{make_request_span, request_id_layers};
