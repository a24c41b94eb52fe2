// ABOUTME: Weather provider abstraction consumed by the aggregation pipeline
// ABOUTME: One async operation: fetch the current observation for a city identifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

//! # Weather Providers
//!
//! The pipeline only knows the [`WeatherProvider`] trait. The production
//! implementation talks to `OpenWeatherMap`; tests plug in scripted providers.
//!
//! Every failure is a [`ProviderError`]. The pipeline treats all of them the
//! same way: the city is unavailable for this run and is dropped.

/// Provider error taxonomy
pub mod errors;
/// `OpenWeatherMap` current-weather client
pub mod openweather;

pub use errors::ProviderError;
pub use openweather::OpenWeatherMapClient;

use crate::models::{CityId, RawWeatherObservation};
use async_trait::async_trait;

/// Source of current weather observations
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Fetch the current observation for one city
    ///
    /// Implementations must bound the call with a timeout so one slow city
    /// cannot stall an aggregation run.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on network failure, timeout, non-success
    /// status, or a payload missing required fields.
    async fn fetch_current(&self, city_id: CityId) -> Result<RawWeatherObservation, ProviderError>;
}
