// ABOUTME: Comfort index scoring constants: ideal bands, penalty slopes, and weights
// ABOUTME: Fixed at compile time so identical observations always score identically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

/// Lowest score any parameter or aggregate can take
pub const SCORE_MIN: f64 = 0.0;

/// Highest score any parameter or aggregate can take
pub const SCORE_MAX: f64 = 100.0;

/// Kelvin to Celsius offset
pub const KELVIN_OFFSET: f64 = 273.15;

/// Temperature plateau (°C)
pub const TEMPERATURE_IDEAL_LOW_C: f64 = 18.0;
/// Temperature plateau upper bound (°C)
pub const TEMPERATURE_IDEAL_HIGH_C: f64 = 24.0;
/// Points lost per °C outside the plateau
pub const TEMPERATURE_PENALTY_PER_DEGREE: f64 = 3.5;

/// Humidity plateau (%)
pub const HUMIDITY_IDEAL_LOW: f64 = 40.0;
/// Humidity plateau upper bound (%)
pub const HUMIDITY_IDEAL_HIGH: f64 = 60.0;
/// Points lost per % outside the plateau
pub const HUMIDITY_PENALTY_PER_PERCENT: f64 = 2.5;

/// Wind plateau (m/s)
pub const WIND_IDEAL_LOW_MS: f64 = 1.0;
/// Wind plateau upper bound (m/s)
pub const WIND_IDEAL_HIGH_MS: f64 = 5.0;
/// Points lost per m/s above the plateau
pub const WIND_PENALTY_PER_MS: f64 = 10.0;
/// Flat score for stagnant air below the plateau
pub const WIND_STAGNANT_SCORE: f64 = 60.0;

/// Cloud cover plateau (%)
pub const CLOUDINESS_IDEAL_LOW: f64 = 20.0;
/// Cloud cover plateau upper bound (%)
pub const CLOUDINESS_IDEAL_HIGH: f64 = 40.0;
/// Points lost per % outside the plateau
pub const CLOUDINESS_PENALTY_PER_PERCENT: f64 = 0.8;

/// Visibility normalization floor (m)
pub const VISIBILITY_MIN_M: f64 = 0.0;
/// Visibility normalization ceiling (m), also the provider cap
pub const VISIBILITY_MAX_M: f64 = 10_000.0;
/// Visibility assumed when the provider omits it (m)
pub const VISIBILITY_DEFAULT_M: f64 = 10_000.0;

/// Aggregate weight of the temperature score
pub const WEIGHT_TEMPERATURE: f64 = 0.35;
/// Aggregate weight of the humidity score
pub const WEIGHT_HUMIDITY: f64 = 0.25;
/// Aggregate weight of the wind score
pub const WEIGHT_WIND: f64 = 0.20;
/// Aggregate weight of the cloudiness score
pub const WEIGHT_CLOUDINESS: f64 = 0.10;
/// Aggregate weight of the visibility score
pub const WEIGHT_VISIBILITY: f64 = 0.10;
