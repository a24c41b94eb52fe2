// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the axum request driver and the scripted weather provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

pub mod axum_test;
pub mod scripted_provider;
