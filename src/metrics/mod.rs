//! NPU counter sampling and utilisation derivation.
//!
//! This module provides the core of the exporter: reading the cumulative
//! runtime counter from sysfs, turning successive samples into a counter
//! delta and a utilisation percentage, and publishing both to a metrics sink.

pub mod data;
pub mod reader;
pub mod sampler;
pub mod sink;
pub mod traits;

// Re-export commonly used items
pub use data::{DerivedMetrics, SamplerState};
pub use reader::SysfsReader;
pub use sampler::UtilizationSampler;
pub use sink::PrometheusSink;
pub use traits::{MetricsSink, SampleReader};
