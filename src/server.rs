// ABOUTME: HTTP server lifecycle: bind, serve the router, and drain on SIGTERM or Ctrl-C
// ABOUTME: Also logs the endpoint listing at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::constants::endpoints;
use crate::resources::ServerResources;
use crate::routes::build_router;

/// Comfort index HTTP server
pub struct ComfortIndexServer {
    resources: Arc<ServerResources>,
}

impl ComfortIndexServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Application router with all layers applied
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(&self.resources)
    }

    /// Bind `0.0.0.0:port` and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails
    pub async fn run(&self, port: u16) -> Result<()> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;

        info!("HTTP server listening on {}", addr);
        display_available_endpoints(port);

        self.serve(listener, wait_for_shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails while accepting connections
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve on SIGTERM or SIGINT (Ctrl-C elsewhere)
pub async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                    _ = sigint.recv() => info!("Received SIGINT, shutting down"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Failed to register signal handlers, falling back to Ctrl-C");
                ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl-C, shutting down");
}

/// Display all available API endpoints
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    info!("   Health:        GET  http://{host}:{port}{}", endpoints::HEALTH_CHECK);
    info!("   Ranked Cities: GET  http://{host}:{port}{} (bearer token)", endpoints::WEATHER);
    info!("   Cache Status:  GET  http://{host}:{port}{} (bearer token)", endpoints::CACHE_STATUS);
    info!("=== End of Endpoint List ===");
}
