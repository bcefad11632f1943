//! Error handling for the NPU exporter crate.
//!
//! Nothing in the sampling loop produces these errors: read failures and
//! clock anomalies are absorbed into numeric fallbacks there. These cover
//! the surrounding setup work (registering metrics, binding the server,
//! reading configuration).

/// A specialized `Result` type for exporter operations.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// The main error type for exporter setup and serving.
#[derive(Debug, thiserror::Error)]
pub enum ExporterError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metric creation, registration or encoding failed
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExporterError {
    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExporterError::config_error("bad address");
        assert_eq!(err.to_string(), "Configuration error: bad address");

        let err = ExporterError::web_server_error("bind failed");
        assert_eq!(err.to_string(), "Web server error: bind failed");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ExporterError = io.into();
        assert!(matches!(err, ExporterError::Io(_)));
    }
}
