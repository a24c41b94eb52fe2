// ABOUTME: OpenWeatherMap current-weather client implementing the WeatherProvider trait
// ABOUTME: Validates the JSON payload once into a RawWeatherObservation at the boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

//! `OpenWeatherMap` integration
//!
//! Issues `GET {base}?id=<cityId>&appid=<key>` for each city. The API key is a
//! query parameter, so transport errors are stripped of their URL before they
//! are wrapped and nothing here logs the request URL.

use super::{ProviderError, WeatherProvider};
use crate::config::ProviderConfig;
use crate::constants::provider::{DEFAULT_PROVIDER_CONNECT_TIMEOUT_SECS, OPENWEATHER_PROVIDER_NAME};
use crate::errors::AppResult;
use crate::models::{CityId, RawWeatherObservation};
use crate::utils::http_client::create_client_with_timeout;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Current-weather payload as returned by the provider
#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    #[serde(default)]
    id: Option<CityId>,
    name: String,
    weather: Vec<OpenWeatherCondition>,
    main: OpenWeatherMain,
    #[serde(default)]
    visibility: Option<f64>,
    wind: OpenWeatherWind,
    clouds: OpenWeatherClouds,
    #[serde(default)]
    sys: OpenWeatherSys,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherClouds {
    all: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OpenWeatherSys {
    #[serde(default)]
    country: String,
}

/// Error body, e.g. `{"cod":401,"message":"Invalid API key"}`
#[derive(Debug, Deserialize)]
struct OpenWeatherErrorBody {
    message: Option<String>,
}

impl OpenWeatherResponse {
    /// The payload's own city id wins; the requested id is only a fallback
    fn into_observation(self, city_id: CityId) -> Result<RawWeatherObservation, ProviderError> {
        let condition =
            self.weather
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::MalformedPayload {
                    city_id,
                    reason: "missing weather condition entry".to_owned(),
                })?;

        Ok(RawWeatherObservation {
            city_id: self.id.unwrap_or(city_id),
            name: self.name,
            country: self.sys.country,
            description: condition.description,
            icon: condition.icon,
            temperature_kelvin: self.main.temp,
            feels_like_kelvin: self.main.feels_like,
            pressure: self.main.pressure,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            cloudiness: self.clouds.all,
            visibility: self.visibility,
        })
    }
}

/// Decode a success body into an observation
///
/// # Errors
///
/// Returns [`ProviderError::MalformedPayload`] when the body is not the
/// expected JSON shape or carries no weather condition.
pub fn parse_current_weather(
    city_id: CityId,
    body: &[u8],
) -> Result<RawWeatherObservation, ProviderError> {
    let payload: OpenWeatherResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::MalformedPayload {
            city_id,
            reason: e.to_string(),
        })?;
    payload.into_observation(city_id)
}

/// `OpenWeatherMap` client
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Build a client with its own connection pool and the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an internal error if the HTTP client cannot be built
    pub fn new(config: &ProviderConfig) -> AppResult<Self> {
        let client = create_client_with_timeout(
            config.timeout,
            Duration::from_secs(DEFAULT_PROVIDER_CONNECT_TIMEOUT_SECS),
        )?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    fn transport_error(&self, city_id: CityId, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout {
                city_id,
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            ProviderError::Network {
                city_id,
                source: error.without_url(),
            }
        }
    }

    async fn status_error(city_id: CityId, response: reqwest::Response) -> ProviderError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return ProviderError::Unauthorized { city_id };
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<OpenWeatherErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_owned()
            });

        ProviderError::HttpStatus {
            city_id,
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    fn name(&self) -> &'static str {
        OPENWEATHER_PROVIDER_NAME
    }

    async fn fetch_current(&self, city_id: CityId) -> Result<RawWeatherObservation, ProviderError> {
        debug!(city_id, provider = self.name(), "Fetching current weather");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("id", city_id.to_string()), ("appid", self.api_key.clone())])
            .send()
            .await
            .map_err(|e| self.transport_error(city_id, e))?;

        if !response.status().is_success() {
            return Err(Self::status_error(city_id, response).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(city_id, e))?;

        parse_current_weather(city_id, &body)
    }
}
