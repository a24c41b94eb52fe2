// ABOUTME: Scripted weather provider for pipeline and route tests without network access
// ABOUTME: Returns pre-configured observations or failures per city and counts every call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use comfort_index_server::models::{CityId, RawWeatherObservation};
use comfort_index_server::providers::{ProviderError, WeatherProvider};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the provider answers for one city
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Successful observation
    Observation(RawWeatherObservation),
    /// Non-success HTTP status
    Status(u16),
    /// Malformed payload
    Malformed,
}

/// Provider with a fixed answer per city
///
/// Cities without a script answer 404. Call counts are kept in total and per
/// city so tests can assert which fetches hit the provider.
pub struct ScriptedProvider {
    outcomes: HashMap<CityId, ScriptedOutcome>,
    calls: AtomicUsize,
    calls_per_city: Mutex<HashMap<CityId, usize>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    /// Provider with no scripted cities
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            calls: AtomicUsize::new(0),
            calls_per_city: Mutex::new(HashMap::new()),
            delay: None,
        }
    }

    /// Answer `observation.city_id` with `observation`
    #[must_use]
    pub fn with_observation(mut self, observation: RawWeatherObservation) -> Self {
        self.outcomes.insert(
            observation.city_id,
            ScriptedOutcome::Observation(observation),
        );
        self
    }

    /// Answer `city_id` with an HTTP status failure
    #[must_use]
    pub fn with_status(mut self, city_id: CityId, status: u16) -> Self {
        self.outcomes
            .insert(city_id, ScriptedOutcome::Status(status));
        self
    }

    /// Answer `city_id` with a malformed payload
    #[must_use]
    pub fn with_malformed(mut self, city_id: CityId) -> Self {
        self.outcomes.insert(city_id, ScriptedOutcome::Malformed);
        self
    }

    /// Sleep before answering, to widen race windows
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total provider calls
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Provider calls for one city
    pub fn calls_for(&self, city_id: CityId) -> usize {
        self.calls_per_city
            .lock()
            .unwrap()
            .get(&city_id)
            .copied()
            .unwrap_or(0)
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_current(&self, city_id: CityId) -> Result<RawWeatherObservation, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .calls_per_city
            .lock()
            .unwrap()
            .entry(city_id)
            .or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.outcomes.get(&city_id) {
            Some(ScriptedOutcome::Observation(observation)) => Ok(observation.clone()),
            Some(ScriptedOutcome::Status(status)) => Err(ProviderError::HttpStatus {
                city_id,
                status: *status,
                message: "scripted failure".to_owned(),
            }),
            Some(ScriptedOutcome::Malformed) => Err(ProviderError::MalformedPayload {
                city_id,
                reason: "scripted malformed payload".to_owned(),
            }),
            None => Err(ProviderError::HttpStatus {
                city_id,
                status: 404,
                message: "city not found".to_owned(),
            }),
        }
    }
}

/// Observation with temperature in Celsius and everything else explicit
#[must_use]
pub fn observation(
    city_id: CityId,
    name: &str,
    temp_celsius: f64,
    humidity: f64,
    wind_speed: f64,
    cloudiness: f64,
) -> RawWeatherObservation {
    RawWeatherObservation {
        city_id,
        name: name.to_owned(),
        country: "XX".to_owned(),
        description: "clear sky".to_owned(),
        icon: "01d".to_owned(),
        temperature_kelvin: temp_celsius + 273.15,
        feels_like_kelvin: temp_celsius + 273.15,
        pressure: 1013.0,
        humidity,
        wind_speed,
        cloudiness,
        visibility: Some(10_000.0),
    }
}

/// Observation with ideal conditions (score 100)
#[must_use]
pub fn ideal_observation(city_id: CityId, name: &str) -> RawWeatherObservation {
    observation(city_id, name, 21.0, 50.0, 3.0, 30.0)
}
