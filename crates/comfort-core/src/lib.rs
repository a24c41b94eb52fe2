// ABOUTME: Core types and constants for the Comfort Index weather service
// ABOUTME: Foundation crate with unified error handling and domain constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

#![deny(unsafe_code)]

//! # Comfort Core
//!
//! Foundation crate shared by the scoring engine and the HTTP service. It is
//! designed to change infrequently so the rest of the workspace can rebuild
//! incrementally.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Cache, provider, and comfort-scoring constants organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;
