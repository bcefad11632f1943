//! Data structures for the sampling loop.

use serde::Serialize;

/// The sampler's persistent state between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerState {
    /// Cumulative runtime at the previous tick, in milliseconds
    pub previous_value: f64,
    /// Monotonic timestamp of the previous tick, in seconds
    pub previous_timestamp: f64,
}

impl SamplerState {
    /// Create state from an initial sample.
    pub fn new(previous_value: f64, previous_timestamp: f64) -> Self {
        Self {
            previous_value,
            previous_timestamp,
        }
    }
}

/// Values derived on a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Milliseconds added to the cumulative runtime counter (never negative)
    pub runtime_delta_ms: f64,
    /// Utilisation percentage (0.0 to 100.0)
    pub utilization_percent: f64,
}
