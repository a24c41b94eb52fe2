// ABOUTME: RS256 bearer token validation against a static public key or the issuer's JWKS
// ABOUTME: Caches signing keys in memory and refetches once when a token names an unknown key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

//! Bearer Token Validation
//!
//! Access tokens are RS256 JWTs issued by the identity provider. A token is
//! accepted when:
//! - the signature verifies against the issuer's signing key
//! - `aud` matches the configured audience
//! - `iss` matches the issuer base URL, with or without a trailing slash
//! - `exp` is present and in the future
//!
//! ## Key Sources
//!
//! - Static PEM: a single public key from configuration, no network access
//! - JWKS: `{issuer}/.well-known/jwks.json`, fetched lazily and cached.
//!   An unknown `kid` triggers one refetch, rate limited by a cooldown.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::key_fetch_client;

/// Path of the key set relative to the issuer
const JWKS_PATH: &str = ".well-known/jwks.json";

/// How long a fetched key set is trusted (10 minutes)
const JWKS_CACHE_TTL_SECS: i64 = 600;

/// Minimum gap between refetches triggered by unknown key IDs
const JWKS_REFRESH_COOLDOWN_SECS: i64 = 30;

/// Claims read from a verified access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user or client identifier)
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    #[serde(default)]
    pub iat: Option<i64>,
    /// Space-separated OAuth scopes
    #[serde(default)]
    pub scope: Option<String>,
    /// RBAC permissions, when the issuer adds them
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Verified caller identity, inserted into request extensions by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    /// Token subject
    pub subject: String,
    /// Scopes and permissions granted to the token
    pub scopes: Vec<String>,
}

impl From<AccessTokenClaims> for AuthenticatedPrincipal {
    fn from(claims: AccessTokenClaims) -> Self {
        let mut scopes: Vec<String> = claims
            .scope
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        for permission in claims.permissions {
            if !scopes.contains(&permission) {
                scopes.push(permission);
            }
        }
        Self {
            subject: claims.sub,
            scopes,
        }
    }
}

/// Cached JWKS keys
struct CachedKeys {
    /// Key ID to decoding key; keys published without `kid` are stored under ""
    keys: HashMap<String, DecodingKey>,
    /// When the cache expires
    expires_at: DateTime<Utc>,
    /// When the set was fetched
    fetched_at: DateTime<Utc>,
}

impl CachedKeys {
    fn lookup(&self, kid: Option<&str>) -> Option<DecodingKey> {
        match kid {
            Some(kid) => self.keys.get(kid).cloned(),
            None if self.keys.len() == 1 => self.keys.values().next().cloned(),
            None => None,
        }
    }
}

/// Lazily fetched, in-memory cached key set
struct JwksKeyStore {
    jwks_url: String,
    http_client: Client,
    cached_keys: Arc<RwLock<Option<CachedKeys>>>,
}

impl JwksKeyStore {
    fn new(jwks_url: String) -> AppResult<Self> {
        Ok(Self {
            jwks_url,
            http_client: key_fetch_client()?,
            cached_keys: Arc::new(RwLock::new(None)),
        })
    }

    /// Decoding key for `kid`, fetching or refetching the set as needed
    async fn key_for(&self, kid: Option<&str>) -> AppResult<DecodingKey> {
        if let Some(key) = self.try_get_cached_key(kid).await {
            return Ok(key);
        }

        if self.refresh_allowed().await {
            self.refresh_keys().await?;
        } else {
            debug!(kid = ?kid, "Signing key refetch suppressed by cooldown");
        }

        let cache = self.cached_keys.read().await;
        cache
            .as_ref()
            .and_then(|cached| cached.lookup(kid))
            .ok_or_else(|| {
                debug!(kid = ?kid, "No signing key matches token");
                AppError::auth_invalid("Unknown token signing key")
            })
    }

    async fn try_get_cached_key(&self, kid: Option<&str>) -> Option<DecodingKey> {
        let cache = self.cached_keys.read().await;
        cache
            .as_ref()
            .filter(|cached| cached.expires_at > Utc::now())
            .and_then(|cached| cached.lookup(kid))
    }

    /// A fresh fetch is allowed when nothing is cached, the set expired, or the cooldown passed
    async fn refresh_allowed(&self) -> bool {
        let cache = self.cached_keys.read().await;
        cache.as_ref().map_or(true, |cached| {
            let now = Utc::now();
            cached.expires_at <= now
                || now - cached.fetched_at >= Duration::seconds(JWKS_REFRESH_COOLDOWN_SECS)
        })
    }

    async fn refresh_keys(&self) -> AppResult<()> {
        info!(jwks_url = %self.jwks_url, "Fetching token signing keys");

        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch signing keys");
                AppError::external_service("jwks", format!("Failed to fetch signing keys: {e}"))
            })?;

        let jwks: JwkSet = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse signing keys");
            AppError::external_service("jwks", format!("Failed to parse signing keys: {e}"))
        })?;

        let keys = decoding_keys_from_jwks(&jwks);
        let now = Utc::now();
        let expires_at = now + Duration::seconds(JWKS_CACHE_TTL_SECS);

        info!(
            num_keys = keys.len(),
            expires_at = %expires_at,
            "Token signing keys cached"
        );

        let mut cache = self.cached_keys.write().await;
        *cache = Some(CachedKeys {
            keys,
            expires_at,
            fetched_at: now,
        });
        Ok(())
    }
}

/// RSA keys from a key set; other key types are skipped
fn decoding_keys_from_jwks(jwks: &JwkSet) -> HashMap<String, DecodingKey> {
    let mut keys = HashMap::with_capacity(jwks.keys.len());
    for jwk in &jwks.keys {
        if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
            continue;
        }
        let kid = jwk.common.key_id.clone().unwrap_or_default();
        match DecodingKey::from_jwk(jwk) {
            Ok(key) => {
                keys.insert(kid, key);
            }
            Err(e) => warn!(kid = %kid, error = %e, "Skipping unusable signing key"),
        }
    }
    keys
}

/// Where verification keys come from
enum KeySource {
    StaticPem(DecodingKey),
    Jwks(JwksKeyStore),
}

/// Access token validator
pub struct JwtValidator {
    key_source: KeySource,
    validation: Validation,
}

impl JwtValidator {
    /// Build a validator from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the static PEM cannot be parsed, or an
    /// internal error if the key fetch client cannot be built
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        let issuer_base = config.issuer_base_url.trim_end_matches('/');

        let key_source = match &config.public_key_pem {
            Some(pem) => {
                // Single-line env values carry escaped newlines
                let pem = pem.replace("\\n", "\n");
                let key = DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                    AppError::config_invalid(format!("Invalid AUTH0_PUBLIC_KEY_PEM: {e}"))
                })?;
                KeySource::StaticPem(key)
            }
            None => KeySource::Jwks(JwksKeyStore::new(format!("{issuer_base}/{JWKS_PATH}"))?),
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[issuer_base.to_owned(), format!("{issuer_base}/")]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);

        Ok(Self {
            key_source,
            validation,
        })
    }

    /// Whether keys come from the issuer's JWKS endpoint
    #[must_use]
    pub const fn uses_jwks(&self) -> bool {
        matches!(self.key_source, KeySource::Jwks(_))
    }

    /// Validate a bearer token and return the caller's identity
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` or `AuthExpired` for a rejected token, and
    /// `ExternalServiceError` when the key set cannot be fetched
    pub async fn validate_token(&self, token: &str) -> AppResult<AuthenticatedPrincipal> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Failed to decode token header");
            AppError::auth_invalid("Invalid token format")
        })?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::auth_invalid("Unsupported token algorithm"));
        }

        let decoding_key = match &self.key_source {
            KeySource::StaticPem(key) => key.clone(),
            KeySource::Jwks(store) => store.key_for(header.kid.as_deref()).await?,
        };

        let token_data = decode::<AccessTokenClaims>(token, &decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token validation failed");
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::auth_expired(),
                    ErrorKind::InvalidAudience => AppError::auth_invalid("Invalid token audience"),
                    ErrorKind::InvalidIssuer => AppError::auth_invalid("Invalid token issuer"),
                    _ => AppError::auth_invalid("Invalid token"),
                }
            })?;

        let principal = AuthenticatedPrincipal::from(token_data.claims);
        debug!(subject = %principal.subject, "Token validated");
        Ok(principal)
    }
}
