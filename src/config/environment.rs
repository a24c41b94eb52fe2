// ABOUTME: Environment-based configuration for the comfort index server
// ABOUTME: Reads .env and process variables into typed, validated server settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use crate::cache::CacheConfig;
use crate::constants::{cache, env_defaults, ports, provider};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Cache lookups and provider calls
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Weather provider settings
#[derive(Clone)]
pub struct ProviderConfig {
    /// API credential, sent as the `appid` query parameter
    pub api_key: String,
    /// Current-weather endpoint
    pub base_url: String,
    /// Total per-call timeout
    pub timeout: Duration,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Bearer token validation settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Expected `aud` claim
    pub audience: String,
    /// Expected `iss` claim and JWKS discovery base
    pub issuer_base_url: String,
    /// Static RS256 public key; JWKS discovery is skipped when set
    pub public_key_pem: Option<String>,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// The single origin allowed by CORS
    pub frontend_url: String,
    /// Weather provider
    pub provider: ProviderConfig,
    /// Token validation
    pub auth: AuthConfig,
    /// Both cache namespaces
    pub cache: CacheConfig,
    /// Cities file overriding the bundled catalog
    pub cities_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from `.env` and the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse
    pub fn from_env() -> AppResult<Self> {
        // A missing .env is normal outside local development
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` for an absent required variable and
    /// `ConfigInvalid` for a value that fails to parse or validate
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = var("NODE_ENV")
            .or_else(|| var("ENVIRONMENT"))
            .map_or_else(Environment::default, |s| Environment::from_str_or_default(&s));

        let ttl_secs = parse_or(&var, "CACHE_TTL_SECONDS", cache::DEFAULT_CACHE_TTL_SECS)?;
        let check_period_secs = parse_or(
            &var,
            "CACHE_CHECK_PERIOD_SECONDS",
            cache::DEFAULT_CHECK_PERIOD_SECS,
        )?;
        let timeout_secs = parse_or(
            &var,
            "PROVIDER_TIMEOUT_SECONDS",
            provider::DEFAULT_PROVIDER_TIMEOUT_SECS,
        )?;

        let config = Self {
            http_port: parse_or(&var, "PORT", ports::DEFAULT_HTTP_PORT)?,
            environment,
            log_level: var("RUST_LOG")
                .map_or_else(LogLevel::default, |s| LogLevel::from_str_or_default(&s)),
            frontend_url: var("FRONTEND_URL")
                .unwrap_or_else(|| env_defaults::FRONTEND_URL.to_owned()),
            provider: ProviderConfig {
                api_key: required(&var, "OWM_API_KEY")?,
                base_url: var("OWM_BASE_URL")
                    .unwrap_or_else(|| provider::OPENWEATHER_CURRENT_URL.to_owned()),
                timeout: Duration::from_secs(timeout_secs),
            },
            auth: AuthConfig {
                audience: required(&var, "AUTH0_AUDIENCE")?,
                issuer_base_url: required(&var, "AUTH0_ISSUER_BASE_URL")?,
                public_key_pem: var("AUTH0_PUBLIC_KEY_PEM"),
            },
            cache: CacheConfig {
                ttl: Duration::from_secs(ttl_secs),
                check_period: Duration::from_secs(check_period_secs),
                enable_background_cleanup: true,
            },
            cities_file: var("CITIES_FILE").map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first violated constraint
    pub fn validate(&self) -> AppResult<()> {
        check_duration(
            "CACHE_TTL_SECONDS",
            self.cache.ttl,
            cache::MAX_CACHE_DURATION_SECS,
        )?;
        check_duration(
            "CACHE_CHECK_PERIOD_SECONDS",
            self.cache.check_period,
            cache::MAX_CACHE_DURATION_SECS,
        )?;
        check_duration(
            "PROVIDER_TIMEOUT_SECONDS",
            self.provider.timeout,
            provider::MAX_PROVIDER_TIMEOUT_SECS,
        )?;
        if self.auth.audience.trim().is_empty() {
            return Err(AppError::config_invalid("AUTH0_AUDIENCE must not be empty"));
        }

        let issuer = url::Url::parse(&self.auth.issuer_base_url).map_err(|e| {
            AppError::config_invalid(format!("AUTH0_ISSUER_BASE_URL is not a valid URL: {e}"))
        })?;
        if !matches!(issuer.scheme(), "http" | "https") {
            return Err(AppError::config_invalid(
                "AUTH0_ISSUER_BASE_URL must use http or https",
            ));
        }

        url::Url::parse(&self.provider.base_url).map_err(|e| {
            AppError::config_invalid(format!("OWM_BASE_URL is not a valid URL: {e}"))
        })?;

        Ok(())
    }

    /// Valid but questionable settings, for the binary to log once logging is up
    #[must_use]
    pub fn startup_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.environment.is_production()
            && !self.auth.issuer_base_url.starts_with("https://")
        {
            warnings.push("AUTH0_ISSUER_BASE_URL is not https in production");
        }
        warnings
    }

    /// One-line summary for startup logs; never includes credentials
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} environment={} log_level={} frontend_url={} provider_timeout={}s cache_ttl={}s cache_check_period={}s key_source={} cities={}",
            self.http_port,
            self.environment,
            self.log_level,
            self.frontend_url,
            self.provider.timeout.as_secs(),
            self.cache.ttl.as_secs(),
            self.cache.check_period.as_secs(),
            if self.auth.public_key_pem.is_some() {
                "static_pem"
            } else {
                "jwks"
            },
            self.cities_file
                .as_ref()
                .map_or_else(|| "bundled".to_owned(), |p| p.display().to_string()),
        )
    }
}

/// Read a required variable
fn required<V>(var: &V, key: &str) -> AppResult<String>
where
    V: Fn(&str) -> Option<String>,
{
    var(key).ok_or_else(|| AppError::config_missing(key))
}

/// Reject a zero duration or one above `max_secs`
fn check_duration(key: &str, value: Duration, max_secs: u64) -> AppResult<()> {
    if value.is_zero() {
        return Err(AppError::config_invalid(format!(
            "{key} must be greater than zero"
        )));
    }
    if value.as_secs() > max_secs {
        return Err(AppError::config_invalid(format!(
            "{key} must be at most {max_secs}"
        )));
    }
    Ok(())
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<V, T>(var: &V, key: &str, default: T) -> AppResult<T>
where
    V: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    var(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("OWM_API_KEY", "owm-secret"),
            ("AUTH0_AUDIENCE", "https://comfort-api"),
            ("AUTH0_ISSUER_BASE_URL", "https://tenant.example.com/"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> AppResult<ServerConfig> {
        ServerConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_owned()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_vars()).unwrap();
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.frontend_url, "http://localhost:5173");
        assert_eq!(config.provider.timeout, Duration::from_secs(8));
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
        assert_eq!(config.cache.check_period, Duration::from_secs(60));
        assert!(config.auth.public_key_pem.is_none());
        assert!(config.cities_file.is_none());
    }

    #[test]
    fn test_missing_required_variable_names_it() {
        let mut vars = base_vars();
        vars.remove("AUTH0_AUDIENCE");
        let error = load(&vars).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigMissing);
        assert!(error.message.contains("AUTH0_AUDIENCE"));
    }

    #[test]
    fn test_empty_required_variable_is_missing() {
        let mut vars = base_vars();
        vars.insert("OWM_API_KEY", "   ");
        let error = load(&vars).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigMissing);
        assert!(error.message.contains("OWM_API_KEY"));
    }

    #[test]
    fn test_unparseable_number_is_invalid() {
        let mut vars = base_vars();
        vars.insert("PORT", "fifty");
        let error = load(&vars).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
        assert!(error.message.contains("PORT"));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut vars = base_vars();
        vars.insert("CACHE_TTL_SECONDS", "0");
        assert_eq!(load(&vars).unwrap_err().code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_oversized_durations_rejected() {
        for key in [
            "CACHE_TTL_SECONDS",
            "CACHE_CHECK_PERIOD_SECONDS",
            "PROVIDER_TIMEOUT_SECONDS",
        ] {
            let mut vars = base_vars();
            vars.insert(key, "18446744073709551615");
            let error = load(&vars).unwrap_err();
            assert_eq!(error.code, ErrorCode::ConfigInvalid, "{key}");
            assert!(error.message.contains(key));
        }
    }

    #[test]
    fn test_duration_bounds_are_inclusive() {
        let mut vars = base_vars();
        vars.insert("CACHE_TTL_SECONDS", "86400");
        vars.insert("PROVIDER_TIMEOUT_SECONDS", "120");
        let config = load(&vars).unwrap();
        assert_eq!(config.cache.ttl, Duration::from_secs(86_400));

        vars.insert("PROVIDER_TIMEOUT_SECONDS", "121");
        assert_eq!(load(&vars).unwrap_err().code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_plain_http_issuer_warns_in_production() {
        let mut vars = base_vars();
        vars.insert("AUTH0_ISSUER_BASE_URL", "http://tenant.example.com/");
        assert!(load(&vars).unwrap().startup_warnings().is_empty());

        vars.insert("NODE_ENV", "production");
        assert_eq!(load(&vars).unwrap().startup_warnings().len(), 1);
    }

    #[test]
    fn test_non_http_issuer_rejected() {
        let mut vars = base_vars();
        vars.insert("AUTH0_ISSUER_BASE_URL", "ftp://tenant.example.com/");
        assert_eq!(load(&vars).unwrap_err().code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_node_env_takes_precedence() {
        let mut vars = base_vars();
        vars.insert("NODE_ENV", "production");
        vars.insert("ENVIRONMENT", "testing");
        assert_eq!(load(&vars).unwrap().environment, Environment::Production);
    }

    #[test]
    fn test_summary_and_debug_hide_api_key() {
        let config = load(&base_vars()).unwrap();
        assert!(!config.summary().contains("owm-secret"));
        assert!(!format!("{config:?}").contains("owm-secret"));
        assert!(config.summary().contains("key_source=jwks"));
    }
}
