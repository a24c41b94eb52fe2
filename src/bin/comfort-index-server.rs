// ABOUTME: Comfort index server binary: loads configuration, initializes logging, and serves HTTP
// ABOUTME: CLI flags override the port and cities file from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

//! # Comfort Index Server Binary
//!
//! Ranks a fixed set of cities by how comfortable their current weather is
//! and serves the ranking to authenticated dashboard clients.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use comfort_index_server::{
    config::ServerConfig, logging, resources::ServerResources, server::ComfortIndexServer,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "comfort-index-server")]
#[command(about = "Comfort Index API - ranks cities by current weather comfort")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Cities JSON file to use instead of the bundled catalog
    #[arg(long)]
    cities_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(cities_file) = args.cities_file {
        config.cities_file = Some(cities_file);
    }

    logging::init_from_env()?;

    info!("Starting Comfort Index server");
    info!("{}", config.summary());
    for warning in config.startup_warnings() {
        warn!("{}", warning);
    }

    let port = config.http_port;
    let resources = Arc::new(ServerResources::from_config(config)?);
    info!(
        cities = resources.catalog.len(),
        provider = resources.provider.name(),
        jwks = resources.jwt_validator.uses_jwks(),
        "Server resources initialized"
    );

    let server = ComfortIndexServer::new(resources);
    if let Err(e) = server.run(port).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
