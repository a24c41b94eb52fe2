// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides test logging, configuration, RS256 token minting, and server resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `comfort_index_server`

use comfort_index_server::auth::JwtValidator;
use comfort_index_server::cities::CityCatalog;
use comfort_index_server::config::ServerConfig;
use comfort_index_server::models::CityId;
use comfort_index_server::providers::WeatherProvider;
use comfort_index_server::resources::ServerResources;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Audience every test token is minted for
pub const TEST_AUDIENCE: &str = "https://comfort-index-api";
/// Issuer every test token is minted by
pub const TEST_ISSUER: &str = "https://comfort-test.example.com/";
/// Key ID published in the test JWKS
pub const TEST_KID: &str = "comfort-test-key";
/// Signing key matching the test public key and JWKS
pub const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_rsa_private.pem");
/// Public half of the test signing key
pub const TEST_PUBLIC_KEY: &str = include_str!("fixtures/test_rsa_public.pem");
/// Unrelated signing key, for forged tokens
pub const OTHER_PRIVATE_KEY: &str = include_str!("fixtures/other_rsa_private.pem");
/// JWKS document publishing the test key under `TEST_KID`
pub const TEST_JWKS: &str = include_str!("fixtures/test_jwks.json");

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Claims for a test access token
#[derive(Debug, Clone, Serialize)]
pub struct TestClaims {
    pub sub: String,
    pub aud: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub scope: String,
}

impl TestClaims {
    /// Valid claims expiring in an hour
    pub fn valid() -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: "auth0|test-user".to_owned(),
            aud: TEST_AUDIENCE.to_owned(),
            iss: TEST_ISSUER.to_owned(),
            exp: now + 3600,
            iat: now,
            scope: "openid profile read:weather".to_owned(),
        }
    }
}

/// Sign `claims` with `private_key_pem`, optionally naming a key ID
pub fn mint_token_with(claims: &TestClaims, private_key_pem: &str, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_owned);
    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).unwrap();
    encode(&header, claims, &key).unwrap()
}

/// Sign `claims` with the test key under `TEST_KID`
pub fn mint_token(claims: &TestClaims) -> String {
    mint_token_with(claims, TEST_PRIVATE_KEY, Some(TEST_KID))
}

/// A token every test validator accepts
pub fn valid_token() -> String {
    mint_token(&TestClaims::valid())
}

/// Configuration with the given extra variables layered over the required ones
pub fn test_config_with(extra: &[(&'static str, String)]) -> ServerConfig {
    let mut vars: HashMap<&'static str, String> = HashMap::from([
        ("OWM_API_KEY", "test-owm-key".to_owned()),
        ("AUTH0_AUDIENCE", TEST_AUDIENCE.to_owned()),
        ("AUTH0_ISSUER_BASE_URL", TEST_ISSUER.to_owned()),
        ("AUTH0_PUBLIC_KEY_PEM", TEST_PUBLIC_KEY.to_owned()),
        ("NODE_ENV", "testing".to_owned()),
    ]);
    for (key, value) in extra {
        vars.insert(*key, value.clone());
    }

    let mut config = ServerConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    config.cache.enable_background_cleanup = false;
    config
}

/// Configuration validating tokens against the static test public key
pub fn test_config() -> ServerConfig {
    test_config_with(&[])
}

/// Catalog holding `city_ids` in order
pub fn catalog_of(city_ids: &[CityId]) -> CityCatalog {
    let records: Vec<serde_json::Value> = city_ids
        .iter()
        .map(|id| serde_json::json!({ "CityCode": id.to_string() }))
        .collect();
    CityCatalog::from_json(&serde_json::Value::Array(records).to_string()).unwrap()
}

/// Server resources over a test provider and catalog
pub fn create_test_resources(
    provider: Arc<dyn WeatherProvider>,
    city_ids: &[CityId],
) -> Arc<ServerResources> {
    init_test_logging();
    let config = test_config();
    let validator = JwtValidator::from_config(&config.auth).unwrap();
    Arc::new(ServerResources::new(
        config,
        catalog_of(city_ids),
        provider,
        validator,
    ))
}
