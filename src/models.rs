// ABOUTME: Domain records: validated provider observations and ranked city comfort entries
// ABOUTME: The flattening from observation plus comfort result into a ranked city lives here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use comfort_intelligence::comfort::kelvin_to_celsius_rounded;
use comfort_intelligence::{ComfortBreakdown, ComfortResult, ComfortWeights, WeatherReading};
use serde::{Deserialize, Serialize};

/// Provider city identifier
pub type CityId = u64;

/// One city's current conditions, validated at the provider boundary
///
/// Immutable once fetched; shared through the raw cache by `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWeatherObservation {
    /// Provider city identifier
    pub city_id: CityId,
    /// City display name
    pub name: String,
    /// ISO 3166 country code, empty when the provider omits it
    pub country: String,
    /// Textual condition, e.g. "scattered clouds"
    pub description: String,
    /// Provider icon code, e.g. "03d"
    pub icon: String,
    /// Air temperature (K)
    pub temperature_kelvin: f64,
    /// Perceived temperature (K)
    pub feels_like_kelvin: f64,
    /// Sea-level pressure (hPa)
    pub pressure: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Cloud cover (%)
    pub cloudiness: f64,
    /// Visibility (m), capped by the provider at 10 km
    pub visibility: Option<f64>,
}

impl RawWeatherObservation {
    /// The subset of measurements the comfort calculator consumes
    #[must_use]
    pub const fn reading(&self) -> WeatherReading {
        WeatherReading {
            temperature_kelvin: self.temperature_kelvin,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            cloudiness: self.cloudiness,
            visibility: self.visibility,
        }
    }
}

/// A city's identity, observation, and comfort score, positioned in the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCity {
    /// Provider city identifier
    pub id: CityId,
    /// City display name
    pub name: String,
    /// Country code
    pub country: String,
    /// Textual condition
    pub description: String,
    /// Provider icon code
    pub icon: String,
    /// Temperature (°C, one decimal)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Cloud cover (%)
    pub cloudiness: f64,
    /// Visibility (m) after the missing-value default
    pub visibility: f64,
    /// Pressure (hPa)
    pub pressure: f64,
    /// Perceived temperature (°C, one decimal)
    pub feels_like: f64,
    /// Aggregate comfort score
    pub comfort_score: f64,
    /// Per-parameter scores
    pub breakdown: ComfortBreakdown,
    /// Weights behind `comfort_score`
    pub weights: ComfortWeights,
    /// Whether the observation came from the raw cache
    pub raw_cache_hit: bool,
    /// 1-based position by descending comfort score; 0 until ranked
    pub rank: usize,
}

impl RankedCity {
    /// Flatten one observation and its comfort result into an unranked record
    #[must_use]
    pub fn assemble(
        observation: &RawWeatherObservation,
        comfort: &ComfortResult,
        raw_cache_hit: bool,
    ) -> Self {
        Self {
            id: observation.city_id,
            name: observation.name.clone(),
            country: observation.country.clone(),
            description: observation.description.clone(),
            icon: observation.icon.clone(),
            temperature: comfort.inputs.temp_celsius,
            humidity: comfort.inputs.humidity,
            wind_speed: comfort.inputs.wind_speed,
            cloudiness: comfort.inputs.cloudiness,
            visibility: comfort.inputs.visibility,
            pressure: observation.pressure,
            feels_like: kelvin_to_celsius_rounded(observation.feels_like_kelvin),
            comfort_score: comfort.score,
            breakdown: comfort.breakdown,
            weights: comfort.weights,
            raw_cache_hit,
            rank: 0,
        }
    }
}
