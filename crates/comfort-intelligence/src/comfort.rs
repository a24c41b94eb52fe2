// ABOUTME: Comfort index calculator combining five weather parameter scores into one 0-100 value
// ABOUTME: Temperature, humidity, wind, cloudiness, and visibility scored against fixed bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

//! Comfort Index Calculator
//!
//! Each parameter is scored on its own 0-100 scale and rounded to one decimal.
//! The aggregate is the weighted sum of those rounded sub-scores, rounded again:
//!
//! ```text
//! score = 0.35*T + 0.25*H + 0.20*W + 0.10*C + 0.10*V
//! ```
//!
//! | Parameter   | Ideal band | Penalty per unit outside the band |
//! |-------------|------------|-----------------------------------|
//! | Temperature | 18-24 °C   | 3.5                               |
//! | Humidity    | 40-60 %    | 2.5                               |
//! | Wind        | 1-5 m/s    | 10 above, flat 60 below           |
//! | Cloudiness  | 20-40 %    | 0.8                               |
//! | Visibility  | linear over 0-10000 m, missing treated as 10000 |  |

use crate::normalizer::{normalize, round_to_tenth, score_from_ideal_range};
use comfort_core::constants::comfort::{
    CLOUDINESS_IDEAL_HIGH, CLOUDINESS_IDEAL_LOW, CLOUDINESS_PENALTY_PER_PERCENT,
    HUMIDITY_IDEAL_HIGH, HUMIDITY_IDEAL_LOW, HUMIDITY_PENALTY_PER_PERCENT, KELVIN_OFFSET,
    SCORE_MAX, TEMPERATURE_IDEAL_HIGH_C, TEMPERATURE_IDEAL_LOW_C, TEMPERATURE_PENALTY_PER_DEGREE,
    VISIBILITY_DEFAULT_M, VISIBILITY_MAX_M, VISIBILITY_MIN_M, WEIGHT_CLOUDINESS, WEIGHT_HUMIDITY,
    WEIGHT_TEMPERATURE, WEIGHT_VISIBILITY, WEIGHT_WIND, WIND_IDEAL_HIGH_MS, WIND_IDEAL_LOW_MS,
    WIND_PENALTY_PER_MS, WIND_STAGNANT_SCORE,
};
use serde::{Deserialize, Serialize};

/// The measurements the calculator consumes from one observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    /// Air temperature in Kelvin
    pub temperature_kelvin: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Cloud cover (%)
    pub cloudiness: f64,
    /// Visibility in meters; providers omit it in some conditions
    pub visibility: Option<f64>,
}

/// Per-parameter scores, each in `[0, 100]` rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortBreakdown {
    /// Temperature score
    pub temperature: f64,
    /// Humidity score
    pub humidity: f64,
    /// Wind speed score
    pub wind: f64,
    /// Cloud cover score
    pub cloudiness: f64,
    /// Visibility score
    pub visibility: f64,
}

/// Weight applied to each parameter score in the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortWeights {
    /// Temperature weight
    pub temperature: f64,
    /// Humidity weight
    pub humidity: f64,
    /// Wind speed weight
    pub wind: f64,
    /// Cloud cover weight
    pub cloudiness: f64,
    /// Visibility weight
    pub visibility: f64,
}

impl ComfortWeights {
    /// The only weight set in use. Must sum to 1.0 or the aggregate leaves `[0, 100]`.
    pub const STANDARD: Self = Self {
        temperature: WEIGHT_TEMPERATURE,
        humidity: WEIGHT_HUMIDITY,
        wind: WEIGHT_WIND,
        cloudiness: WEIGHT_CLOUDINESS,
        visibility: WEIGHT_VISIBILITY,
    };

    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.temperature + self.humidity + self.wind + self.cloudiness + self.visibility
    }

    fn weighted_sum(&self, breakdown: &ComfortBreakdown) -> f64 {
        breakdown.temperature * self.temperature
            + breakdown.humidity * self.humidity
            + breakdown.wind * self.wind
            + breakdown.cloudiness * self.cloudiness
            + breakdown.visibility * self.visibility
    }
}

/// Human-readable inputs echoed alongside a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComfortInputs {
    /// Temperature in °C, one decimal
    pub temp_celsius: f64,
    /// Temperature in Kelvin as observed
    pub temp_kelvin: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Cloud cover (%)
    pub cloudiness: f64,
    /// Visibility in meters after the missing-value default
    pub visibility: f64,
}

/// Outcome of scoring one observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortResult {
    /// Aggregate comfort score in `[0, 100]`, one decimal
    pub score: f64,
    /// Per-parameter scores
    pub breakdown: ComfortBreakdown,
    /// Weights used for the aggregate
    pub weights: ComfortWeights,
    /// Derived inputs
    pub inputs: ComfortInputs,
}

/// Stateless comfort index calculator
pub struct ComfortIndexCalculator;

impl ComfortIndexCalculator {
    /// Score one reading
    #[must_use]
    pub fn compute(reading: &WeatherReading) -> ComfortResult {
        let visibility = reading.visibility.unwrap_or(VISIBILITY_DEFAULT_M);
        let weights = ComfortWeights::STANDARD;

        let breakdown = ComfortBreakdown {
            temperature: round_to_tenth(Self::score_temperature(reading.temperature_kelvin)),
            humidity: round_to_tenth(Self::score_humidity(reading.humidity)),
            wind: round_to_tenth(Self::score_wind_speed(reading.wind_speed)),
            cloudiness: round_to_tenth(Self::score_cloudiness(reading.cloudiness)),
            visibility: round_to_tenth(Self::score_visibility(visibility)),
        };

        ComfortResult {
            score: round_to_tenth(weights.weighted_sum(&breakdown)),
            breakdown,
            weights,
            inputs: ComfortInputs {
                temp_celsius: kelvin_to_celsius_rounded(reading.temperature_kelvin),
                temp_kelvin: reading.temperature_kelvin,
                humidity: reading.humidity,
                wind_speed: reading.wind_speed,
                cloudiness: reading.cloudiness,
                visibility,
            },
        }
    }

    /// Temperature score from Kelvin, ideal 18-24 °C
    #[must_use]
    pub fn score_temperature(temperature_kelvin: f64) -> f64 {
        score_from_ideal_range(
            temperature_kelvin - KELVIN_OFFSET,
            TEMPERATURE_IDEAL_LOW_C,
            TEMPERATURE_IDEAL_HIGH_C,
            TEMPERATURE_PENALTY_PER_DEGREE,
        )
    }

    /// Humidity score, ideal 40-60 %
    #[must_use]
    pub fn score_humidity(humidity: f64) -> f64 {
        score_from_ideal_range(
            humidity,
            HUMIDITY_IDEAL_LOW,
            HUMIDITY_IDEAL_HIGH,
            HUMIDITY_PENALTY_PER_PERCENT,
        )
    }

    /// Wind score, ideal 1-5 m/s; stagnant air below 1 m/s is a flat 60
    #[must_use]
    pub fn score_wind_speed(wind_speed: f64) -> f64 {
        if (WIND_IDEAL_LOW_MS..=WIND_IDEAL_HIGH_MS).contains(&wind_speed) {
            return SCORE_MAX;
        }
        if wind_speed < WIND_IDEAL_LOW_MS {
            return WIND_STAGNANT_SCORE;
        }
        score_from_ideal_range(
            wind_speed,
            WIND_IDEAL_LOW_MS,
            WIND_IDEAL_HIGH_MS,
            WIND_PENALTY_PER_MS,
        )
    }

    /// Cloud cover score, ideal 20-40 %
    #[must_use]
    pub fn score_cloudiness(cloudiness: f64) -> f64 {
        score_from_ideal_range(
            cloudiness,
            CLOUDINESS_IDEAL_LOW,
            CLOUDINESS_IDEAL_HIGH,
            CLOUDINESS_PENALTY_PER_PERCENT,
        )
    }

    /// Visibility score, linear over 0-10000 m
    #[must_use]
    pub fn score_visibility(visibility: f64) -> f64 {
        normalize(visibility, VISIBILITY_MIN_M, VISIBILITY_MAX_M)
    }
}

/// Kelvin to Celsius, rounded to one decimal
#[must_use]
pub fn kelvin_to_celsius_rounded(kelvin: f64) -> f64 {
    round_to_tenth(kelvin - KELVIN_OFFSET)
}
