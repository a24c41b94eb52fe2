// ABOUTME: Domain services sitting between the HTTP routes and the cache and provider layers
// ABOUTME: Hosts the aggregation pipeline that produces the ranked comfort snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

/// Fan-out, scoring, and ranking of every catalog city
pub mod aggregation;

pub use aggregation::{rank_cities, AggregationOutcome, CityAggregator, EmptySnapshotPolicy};
