//! HTTP server exposing the exporter's metrics.
//!
//! Prometheus scrapes `/metrics`; `/api/health` reports liveness.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::{port_from_env, WebConfig};
pub use router::create_app;

use crate::error::{ExporterError, Result};
use prometheus::Registry;
use std::net::SocketAddr;
use tracing::info;

/// Start the metrics server with the provided configuration, serving every
/// metric in `registry`.
pub async fn start_web_server(config: WebConfig, registry: Registry) -> Result<()> {
    let app = create_app(registry);

    // Parse the bind address
    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| ExporterError::config_error(format!("Invalid bind address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Serving NPU metrics on http://{}/metrics", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
