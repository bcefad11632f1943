//! # NPU Exporter - Intel NPU utilisation metrics
//!
//! A small Prometheus exporter for the Intel Neural Processing Unit. The
//! kernel exposes the cumulative time the device has spent active through
//! sysfs; this crate samples that counter once a second, derives an
//! instantaneous utilisation percentage from successive samples, and serves
//! both over HTTP.
//!
//! ## Features
//!
//! - **Cumulative runtime counter**: milliseconds of NPU activity, only ever incremented
//! - **Utilisation gauge**: percentage of wall-clock time the NPU was active, bounded to 0-100
//! - **Resilient sampling**: missing files, counter resets and clock stalls never stop the loop
//! - **Library + Binary**: use as a crate or standalone exporter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use npu_exporter::{start_web_server, PrometheusSink, SysfsReader, UtilizationSampler, WebConfig};
//! use npu_exporter::metrics::sampler::MonotonicClock;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = PrometheusSink::new()?;
//!     let registry = sink.registry();
//!     let clock = MonotonicClock::new();
//!     let sampler = UtilizationSampler::new(SysfsReader::default(), sink, clock.now());
//!
//!     tokio::spawn(sampler.run(clock, npu_exporter::DEFAULT_INTERVAL));
//!     start_web_server(WebConfig::default(), registry).await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

pub mod error;
pub mod metrics;
pub mod web;

// Re-export public API
pub use error::{ExporterError, Result};
pub use metrics::{
    data::{DerivedMetrics, SamplerState},
    reader::SysfsReader,
    sampler::UtilizationSampler,
    sink::PrometheusSink,
    traits::{MetricsSink, SampleReader},
};

pub use web::{start_web_server, WebConfig};

/// The sampling interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// The sampling interval as a `Duration`
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(DEFAULT_INTERVAL_MS);

/// The default metrics server port
pub const DEFAULT_PORT: u16 = 8000;

/// Environment variable that overrides the metrics server port
pub const PORT_ENV_VAR: &str = "NPU_EXPORTER_PORT";

// sysfs directory of the NPU PCI device
macro_rules! npu_device_dir {
    () => {
        "/sys/devices/pci0000:00/0000:00:0b.0"
    };
}

/// Default location of the cumulative runtime counter
pub const DEFAULT_RUNTIME_PATH: &str = concat!(npu_device_dir!(), "/power/runtime_active_time");
