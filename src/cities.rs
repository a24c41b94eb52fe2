// ABOUTME: City catalog loaded from the bundled cities.json or an operator-supplied file
// ABOUTME: Produces the ordered, de-duplicated list of provider city identifiers to aggregate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use crate::errors::{AppError, AppResult};
use crate::models::CityId;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Catalog shipped with the server
const BUNDLED_CITIES: &str = include_str!("../cities.json");

/// City code as it appears in the file: a string or a bare number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CityCode {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    #[serde(rename = "CityCode")]
    city_code: CityCode,
    #[serde(rename = "CityName", default)]
    city_name: Option<String>,
}

/// Ordered set of city identifiers fanned out on every aggregation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCatalog {
    ids: Vec<CityId>,
}

impl CityCatalog {
    /// Catalog bundled into the binary
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the bundled file is malformed
    pub fn bundled() -> AppResult<Self> {
        Self::from_json(BUNDLED_CITIES)
    }

    /// Load from `path`, or the bundled catalog when `None`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the file cannot be read or parsed, is empty,
    /// or contains a non-numeric city code
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let Some(path) = path else {
            return Self::bundled();
        };

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::config_invalid(format!(
                "Failed to read cities file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Parse a catalog document
    ///
    /// File order is kept; a repeated code keeps its first position.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for malformed JSON, an unparseable code, or an
    /// empty catalog
    pub fn from_json(contents: &str) -> AppResult<Self> {
        let records: Vec<CityRecord> = serde_json::from_str(contents)
            .map_err(|e| AppError::config_invalid(format!("Invalid cities file: {e}")))?;

        let mut seen = HashSet::with_capacity(records.len());
        let mut ids = Vec::with_capacity(records.len());

        for record in records {
            let id = match record.city_code {
                CityCode::Number(id) => id,
                CityCode::Text(text) => text.trim().parse().map_err(|_| {
                    AppError::config_invalid(format!(
                        "Invalid CityCode '{text}' for {}",
                        record.city_name.as_deref().unwrap_or("unnamed city")
                    ))
                })?,
            };

            if seen.insert(id) {
                ids.push(id);
            } else {
                warn!(city_id = id, "Duplicate CityCode in cities file ignored");
            }
        }

        if ids.is_empty() {
            return Err(AppError::config_invalid("Cities file contains no cities"));
        }

        debug!(count = ids.len(), "Loaded city catalog");
        Ok(Self { ids })
    }

    /// Identifiers in fan-out order
    #[must_use]
    pub fn ids(&self) -> &[CityId] {
        &self.ids
    }

    /// Number of cities
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false for a loaded catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
