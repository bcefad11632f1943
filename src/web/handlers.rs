//! HTTP handlers for the metrics server.

use crate::metrics::sink::encode_registry;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use prometheus::Registry;
use serde_json::json;
use tracing::error;

/// Serve every registered metric in the Prometheus text format.
pub async fn metrics(State(registry): State<Registry>) -> Response {
    match encode_registry(&registry) {
        Ok((body, content_type)) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "npu-exporter",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Landing page pointing scrapers at the metrics endpoint.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Intel NPU Exporter</title></head>
<body>
<h1>Intel NPU Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/api/health">Health</a></p>
</body>
</html>
"#;
