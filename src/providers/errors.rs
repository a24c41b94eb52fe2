// ABOUTME: Structured error types for weather provider calls
// ABOUTME: Network, timeout, HTTP status, credential, and malformed payload failures per city
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use crate::models::CityId;
use thiserror::Error;

/// Why a single city's observation could not be obtained
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("network error fetching city {city_id}: {source}")]
    Network {
        /// City being fetched
        city_id: CityId,
        /// Underlying client error, stripped of its URL
        #[source]
        source: reqwest::Error,
    },

    /// The call exceeded the configured timeout
    #[error("request for city {city_id} timed out after {timeout_secs}s")]
    Timeout {
        /// City being fetched
        city_id: CityId,
        /// Timeout that elapsed
        timeout_secs: u64,
    },

    /// Provider rejected the API key
    #[error("provider rejected credentials while fetching city {city_id}")]
    Unauthorized {
        /// City being fetched
        city_id: CityId,
    },

    /// Any other non-success HTTP status
    #[error("provider returned HTTP {status} for city {city_id}: {message}")]
    HttpStatus {
        /// City being fetched
        city_id: CityId,
        /// HTTP status code
        status: u16,
        /// Provider's error message, or the status reason
        message: String,
    },

    /// Payload did not match the expected shape
    #[error("malformed payload for city {city_id}: {reason}")]
    MalformedPayload {
        /// City being fetched
        city_id: CityId,
        /// What was wrong with it
        reason: String,
    },
}

impl ProviderError {
    /// City this failure belongs to
    #[must_use]
    pub const fn city_id(&self) -> CityId {
        match self {
            Self::Network { city_id, .. }
            | Self::Timeout { city_id, .. }
            | Self::Unauthorized { city_id }
            | Self::HttpStatus { city_id, .. }
            | Self::MalformedPayload { city_id, .. } => *city_id,
        }
    }

    /// Short machine-readable category for structured logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Timeout { .. } => "timeout",
            Self::Unauthorized { .. } => "unauthorized",
            Self::HttpStatus { .. } => "http_status",
            Self::MalformedPayload { .. } => "malformed_payload",
        }
    }
}
