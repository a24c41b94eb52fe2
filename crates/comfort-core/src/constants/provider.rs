// ABOUTME: Weather provider constants for the OpenWeatherMap current-weather API
// ABOUTME: Endpoint and timeout defaults for the provider client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

/// Current-weather endpoint, queried with `id` and `appid`
pub const OPENWEATHER_CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Provider name used in logs and error messages
pub const OPENWEATHER_PROVIDER_NAME: &str = "OpenWeatherMap";

/// Total per-call timeout
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 8;

/// Upper bound accepted for the per-call timeout
pub const MAX_PROVIDER_TIMEOUT_SECS: u64 = 120;

/// Connection establishment timeout
pub const DEFAULT_PROVIDER_CONNECT_TIMEOUT_SECS: u64 = 3;
