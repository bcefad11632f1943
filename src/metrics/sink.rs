//! Prometheus-backed metrics sink.

use crate::error::Result;
use crate::metrics::traits::MetricsSink;
use prometheus::{Counter, Encoder, Gauge, Registry, TextEncoder};

/// Name of the cumulative runtime counter.
pub const RUNTIME_COUNTER_NAME: &str = "intel_npu_runtime_milliseconds_total";

/// Name of the utilisation gauge.
pub const UTILIZATION_GAUGE_NAME: &str = "intel_npu_usage_percent";

/// Publishes sampler output to a Prometheus registry.
///
/// Metric handles are atomic, so the registry can be scraped while the
/// sampler is updating it.
#[derive(Clone)]
pub struct PrometheusSink {
    registry: Registry,
    runtime_counter: Counter,
    utilization_gauge: Gauge,
}

impl PrometheusSink {
    /// Create a sink with its own registry.
    pub fn new() -> Result<Self> {
        Self::with_registry(Registry::new())
    }

    /// Create a sink that registers its metrics with `registry`.
    pub fn with_registry(registry: Registry) -> Result<Self> {
        let runtime_counter = Counter::new(
            RUNTIME_COUNTER_NAME,
            "Cumulative active runtime of the Intel NPU in milliseconds",
        )?;
        let utilization_gauge = Gauge::new(
            UTILIZATION_GAUGE_NAME,
            "Instantaneous utilisation of the Intel NPU as a percentage",
        )?;

        registry.register(Box::new(runtime_counter.clone()))?;
        registry.register(Box::new(utilization_gauge.clone()))?;

        Ok(Self {
            registry,
            runtime_counter,
            utilization_gauge,
        })
    }

    /// A handle to the registry holding this sink's metrics.
    pub fn registry(&self) -> Registry {
        self.registry.clone()
    }

    /// Current value of the cumulative runtime counter.
    pub fn runtime_total(&self) -> f64 {
        self.runtime_counter.get()
    }

    /// Current value of the utilisation gauge.
    pub fn utilization(&self) -> f64 {
        self.utilization_gauge.get()
    }
}

impl MetricsSink for PrometheusSink {
    fn increment_counter(&self, amount: f64) {
        self.runtime_counter.inc_by(amount);
    }

    fn set_gauge(&self, value: f64) {
        self.utilization_gauge.set(value);
    }
}

/// Render every metric in `registry` in the Prometheus text format.
///
/// Returns the body along with its content type.
pub fn encode_registry(registry: &Registry) -> Result<(String, String)> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;

    // The text encoder only ever writes UTF-8.
    let body = String::from_utf8_lossy(&buffer).into_owned();
    Ok((body, encoder.format_type().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_updates_metrics() {
        let sink = PrometheusSink::new().unwrap();
        sink.increment_counter(250.0);
        sink.increment_counter(125.5);
        sink.set_gauge(42.0);

        assert_eq!(sink.runtime_total(), 375.5);
        assert_eq!(sink.utilization(), 42.0);

        sink.set_gauge(7.0);
        assert_eq!(sink.utilization(), 7.0);
    }

    #[test]
    fn test_encode_registry() {
        let sink = PrometheusSink::new().unwrap();
        sink.increment_counter(1000.0);
        sink.set_gauge(12.5);

        let (body, content_type) = encode_registry(&sink.registry()).unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert!(body.contains("# TYPE intel_npu_runtime_milliseconds_total counter"));
        assert!(body.contains("intel_npu_runtime_milliseconds_total 1000"));
        assert!(body.contains("# TYPE intel_npu_usage_percent gauge"));
        assert!(body.contains("intel_npu_usage_percent 12.5"));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = Registry::new();
        assert!(PrometheusSink::with_registry(registry.clone()).is_ok());
        assert!(PrometheusSink::with_registry(registry).is_err());
    }
}
