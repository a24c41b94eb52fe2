// ABOUTME: Configuration module root
// ABOUTME: Environment-driven server configuration and its typed sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

/// Environment variable parsing into `ServerConfig`
pub mod environment;

pub use environment::{AuthConfig, Environment, LogLevel, ProviderConfig, ServerConfig};
