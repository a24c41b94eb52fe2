// ABOUTME: Score normalization primitives mapping raw measurements onto a 0-100 scale
// ABOUTME: Clamp, linear normalize, plateau-with-falloff scoring, and half-up rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use comfort_core::constants::comfort::{SCORE_MAX, SCORE_MIN};

/// Restrict `value` to `[min, max]`
///
/// NaN collapses to `min`, so no NaN ever leaves this function.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Restrict `value` to the score range `[0, 100]`
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    clamp(value, SCORE_MIN, SCORE_MAX)
}

/// Linearly map `value` from `[min, max]` onto `[0, 100]`, then clamp
///
/// A degenerate range (`min == max`) is treated as fully satisfied and
/// returns 100. Any other range, however narrow, scales linearly.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if min == max {
        return SCORE_MAX;
    }
    clamp_score((value - min) / (max - min) * SCORE_MAX)
}

/// Score `value` against an ideal plateau `[ideal_low, ideal_high]`
///
/// Inside the plateau the score is 100. Outside it drops by
/// `penalty_per_unit` for every unit of distance to the nearer bound and
/// bottoms out at 0.
#[must_use]
pub fn score_from_ideal_range(
    value: f64,
    ideal_low: f64,
    ideal_high: f64,
    penalty_per_unit: f64,
) -> f64 {
    if (ideal_low..=ideal_high).contains(&value) {
        return SCORE_MAX;
    }
    let deviation = if value < ideal_low {
        ideal_low - value
    } else {
        value - ideal_high
    };
    clamp_score(SCORE_MAX - deviation * penalty_per_unit)
}

/// Round to one decimal place, halves rounding up
///
/// `round_to_tenth(0.25) == 0.3` and `round_to_tenth(-0.25) == -0.2`.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
