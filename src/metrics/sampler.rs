//! Utilisation sampler: turns successive runtime samples into metrics.

use crate::metrics::{
    data::{DerivedMetrics, SamplerState},
    traits::{MetricsSink, SampleReader},
};
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{debug, info};

/// Monotonic seconds since a fixed origin.
///
/// Backed by tokio's clock so paused-time tests drive it too.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock was created.
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Derive a utilisation percentage from a runtime delta and elapsed time,
/// both in milliseconds.
///
/// Returns 0 when no time has elapsed. The result is clamped to 0-100 since
/// the counter and the clock are not read atomically together.
pub fn utilization(runtime_delta_ms: f64, elapsed_ms: f64) -> f64 {
    if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
        return 0.0;
    }
    ((runtime_delta_ms / elapsed_ms) * 100.0).clamp(0.0, 100.0)
}

/// Samples the cumulative runtime counter and publishes derived metrics.
pub struct UtilizationSampler<R, S> {
    reader: R,
    sink: S,
    state: SamplerState,
}

impl<R: SampleReader, S: MetricsSink> UtilizationSampler<R, S> {
    /// Create a sampler, taking the initial sample at `now` (seconds).
    ///
    /// An unreadable source yields an initial value of zero.
    pub fn new(reader: R, sink: S, now: f64) -> Self {
        let initial = reader.read().unwrap_or(0.0);
        debug!("Initial NPU runtime sample: {}ms at t={:.3}s", initial, now);

        Self {
            reader,
            sink,
            state: SamplerState::new(initial, now),
        }
    }

    /// The state carried into the next tick.
    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// The sink this sampler publishes to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one sampling iteration at monotonic time `now` (seconds).
    ///
    /// Publishes the counter delta (when positive) and the utilisation gauge,
    /// then returns both. Never fails: an absent sample counts as zero, a
    /// counter regression yields a zero delta, and a clock that did not
    /// advance yields zero utilisation.
    pub fn tick(&mut self, now: f64) -> DerivedMetrics {
        let current_value = self.reader.read().unwrap_or(0.0);
        let SamplerState {
            previous_value,
            previous_timestamp,
        } = self.state;

        if current_value < previous_value {
            debug!(
                "NPU runtime counter went backwards ({}ms -> {}ms), treating delta as zero",
                previous_value, current_value
            );
        }
        let runtime_delta_ms = (current_value - previous_value).max(0.0);
        if runtime_delta_ms > 0.0 {
            self.sink.increment_counter(runtime_delta_ms);
        }

        let elapsed_ms = (now - previous_timestamp) * 1000.0;
        if elapsed_ms <= 0.0 {
            debug!("No time elapsed since previous sample ({}ms), utilisation is zero", elapsed_ms);
        }
        let utilization_percent = utilization(runtime_delta_ms, elapsed_ms);
        self.sink.set_gauge(utilization_percent);

        self.state = SamplerState::new(current_value, now);

        let derived = DerivedMetrics {
            runtime_delta_ms,
            utilization_percent,
        };
        debug!(
            "Tick: runtime +{}ms over {:.1}ms, utilisation {:.2}%",
            derived.runtime_delta_ms, elapsed_ms, derived.utilization_percent
        );
        derived
    }

    /// Sample forever, sleeping `interval` after each tick.
    ///
    /// The sleep does not account for the time spent sampling, so ticks drift
    /// by the cost of each read.
    pub async fn run(mut self, clock: MonotonicClock, interval: Duration) {
        info!("Sampling NPU runtime every {}ms", interval.as_millis());
        loop {
            self.tick(clock.now());
            time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Returns queued samples in order, then `None` once exhausted.
    struct ScriptedReader(Mutex<VecDeque<Option<f64>>>);

    impl ScriptedReader {
        fn new(samples: impl IntoIterator<Item = Option<f64>>) -> Self {
            Self(Mutex::new(samples.into_iter().collect()))
        }
    }

    impl SampleReader for ScriptedReader {
        fn read(&self) -> Option<f64> {
            self.0.lock().unwrap().pop_front().flatten()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        increments: Mutex<Vec<f64>>,
        gauges: Mutex<Vec<f64>>,
    }

    impl MetricsSink for RecordingSink {
        fn increment_counter(&self, amount: f64) {
            self.increments.lock().unwrap().push(amount);
        }

        fn set_gauge(&self, value: f64) {
            self.gauges.lock().unwrap().push(value);
        }
    }

    #[test]
    fn test_utilization_bounds() {
        assert_eq!(utilization(500.0, 1000.0), 50.0);
        assert_eq!(utilization(0.0, 1000.0), 0.0);
        assert_eq!(utilization(1500.0, 1000.0), 100.0);
        assert_eq!(utilization(500.0, 0.0), 0.0);
        assert_eq!(utilization(500.0, -250.0), 0.0);
        assert_eq!(utilization(500.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_half_busy_second() {
        let reader = ScriptedReader::new([Some(1000.0), Some(1500.0)]);
        let mut sampler = UtilizationSampler::new(reader, RecordingSink::default(), 0.0);

        let derived = sampler.tick(1.0);
        assert_eq!(derived.runtime_delta_ms, 500.0);
        assert_eq!(derived.utilization_percent, 50.0);
        assert_eq!(*sampler.sink().increments.lock().unwrap(), vec![500.0]);
        assert_eq!(*sampler.sink().gauges.lock().unwrap(), vec![50.0]);
        assert_eq!(sampler.state(), SamplerState::new(1500.0, 1.0));
    }

    #[test]
    fn test_unreadable_initial_sample_is_zero() {
        let reader = ScriptedReader::new([None, Some(250.0)]);
        let mut sampler = UtilizationSampler::new(reader, RecordingSink::default(), 0.0);
        assert_eq!(sampler.state().previous_value, 0.0);

        let derived = sampler.tick(1.0);
        assert_eq!(derived.runtime_delta_ms, 250.0);
        assert_eq!(derived.utilization_percent, 25.0);
    }

    #[test]
    fn test_gauge_set_even_without_increment() {
        let reader = ScriptedReader::new([Some(1000.0), Some(1000.0)]);
        let mut sampler = UtilizationSampler::new(reader, RecordingSink::default(), 10.0);

        let derived = sampler.tick(10.0);
        assert_eq!(derived, DerivedMetrics::default());
        assert!(sampler.sink().increments.lock().unwrap().is_empty());
        assert_eq!(*sampler.sink().gauges.lock().unwrap(), vec![0.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_once_per_interval() {
        let reader = ScriptedReader::new([Some(0.0), Some(100.0), Some(300.0), Some(600.0)]);
        let sink = Arc::new(RecordingSink::default());
        let clock = MonotonicClock::new();
        let sampler = UtilizationSampler::new(reader, Arc::clone(&sink), clock.now());

        let handle = tokio::spawn(sampler.run(clock, Duration::from_secs(1)));

        // First tick runs immediately, then one per second.
        tokio::time::sleep(Duration::from_millis(2500)).await;
        handle.abort();

        assert_eq!(*sink.increments.lock().unwrap(), vec![100.0, 200.0, 300.0]);
        assert_eq!(sink.gauges.lock().unwrap().len(), 3);
    }
}
