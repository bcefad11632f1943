//! Metrics server configuration.

use tracing::warn;

/// Configuration for the metrics server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_PORT,
        }
    }
}

impl WebConfig {
    /// Create a new web configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Set the host for the web server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the web server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Interpret a raw port setting, falling back to the default port when it is
/// absent or not a valid port number.
pub fn parse_port(raw: Option<&str>) -> u16 {
    let Some(raw) = raw else {
        return crate::DEFAULT_PORT;
    };

    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(e) => {
            warn!(
                "Ignoring invalid {} value {:?} ({}), using port {}",
                crate::PORT_ENV_VAR,
                raw,
                e,
                crate::DEFAULT_PORT
            );
            crate::DEFAULT_PORT
        }
    }
}

/// Read the serving port from the `NPU_EXPORTER_PORT` environment variable.
pub fn port_from_env() -> u16 {
    let raw = std::env::var(crate::PORT_ENV_VAR).ok();
    parse_port(raw.as_deref())
}
