// ABOUTME: Bearer token middleware guarding the /api routes
// ABOUTME: Validates Authorization: Bearer <jwt> and stores the verified principal in request extensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::JwtValidator;
use crate::constants::headers::BEARER_PREFIX;
use crate::errors::AppError;

/// Token from an `Authorization: Bearer <token>` header
///
/// Returns `None` when the header is absent, not UTF-8, uses another scheme,
/// or carries an empty token.
#[must_use]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject requests without a valid bearer token
///
/// Every authentication failure renders the same 401 body. A key set fetch
/// failure is not an authentication failure and renders as its own error.
#[tracing::instrument(
    skip_all,
    fields(
        path = %request.uri().path(),
        subject = tracing::field::Empty,
        success = tracing::field::Empty,
    )
)]
pub async fn require_bearer_token(
    State(validator): State<Arc<JwtValidator>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(request.headers()) else {
        tracing::Span::current().record("success", false);
        tracing::warn!(reason = "missing bearer token", "Rejected request");
        return AppError::auth_required().into_response();
    };

    match validator.validate_token(token).await {
        Ok(principal) => {
            tracing::Span::current()
                .record("subject", principal.subject.as_str())
                .record("success", true);
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => {
            tracing::Span::current().record("success", false);
            if e.code.is_auth_failure() {
                tracing::warn!(reason = %e.message, "Rejected request");
            }
            e.into_response()
        }
    }
}
