// ABOUTME: Utility modules shared across the server
// ABOUTME: Currently the HTTP client constructors used by outbound integrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

/// Outbound HTTP client construction
pub mod http_client;
