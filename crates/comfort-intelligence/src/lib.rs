// ABOUTME: Comfort index scoring engine for city weather observations
// ABOUTME: Pure, deterministic functions with no I/O and no shared state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

#![deny(unsafe_code)]

//! # Comfort Intelligence
//!
//! Turns one weather observation into a 0-100 comfort score plus a
//! per-parameter breakdown. Every function here is referentially transparent:
//! the same reading always yields a bit-identical result, which is what makes
//! caching the processed snapshot safe.

/// Comfort index calculator combining five parameter scores
pub mod comfort;
/// Clamping, linear normalization, and ideal-range scoring primitives
pub mod normalizer;

pub use comfort::{
    ComfortBreakdown, ComfortIndexCalculator, ComfortInputs, ComfortResult, ComfortWeights,
    WeatherReading,
};
pub use normalizer::{clamp, clamp_score, normalize, round_to_tenth, score_from_ideal_range};
