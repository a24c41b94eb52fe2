// ABOUTME: Shared server resources constructed once at startup and handed to every route
// ABOUTME: Bundles configuration, cache, provider, aggregation pipeline, token validator, and city catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use std::sync::Arc;

use crate::auth::JwtValidator;
use crate::cache::WeatherCache;
use crate::cities::CityCatalog;
use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::providers::{OpenWeatherMapClient, WeatherProvider};
use crate::services::CityAggregator;

/// Process-wide dependencies, shared as `Arc<ServerResources>`
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Two-layer weather cache
    pub cache: Arc<WeatherCache>,
    /// Weather provider behind the pipeline
    pub provider: Arc<dyn WeatherProvider>,
    /// Aggregation pipeline
    pub aggregator: CityAggregator,
    /// Bearer token validator
    pub jwt_validator: Arc<JwtValidator>,
    /// Cities to rank
    pub catalog: Arc<CityCatalog>,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    ///
    /// Spawns the cache sweep tasks when enabled, so a Tokio runtime must be running.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        catalog: CityCatalog,
        provider: Arc<dyn WeatherProvider>,
        jwt_validator: JwtValidator,
    ) -> Self {
        let cache = Arc::new(WeatherCache::new(&config.cache));
        let aggregator = CityAggregator::new(Arc::clone(&cache), Arc::clone(&provider));

        Self {
            config: Arc::new(config),
            cache,
            provider,
            aggregator,
            jwt_validator: Arc::new(jwt_validator),
            catalog: Arc::new(catalog),
        }
    }

    /// Build production resources: `OpenWeatherMap` client, configured catalog, and validator
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the cities file or the static key is unusable
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let catalog = CityCatalog::load(config.cities_file.as_deref())?;
        let jwt_validator = JwtValidator::from_config(&config.auth)?;
        let provider: Arc<dyn WeatherProvider> =
            Arc::new(OpenWeatherMapClient::new(&config.provider)?);

        Ok(Self::new(config, catalog, provider, jwt_validator))
    }
}
