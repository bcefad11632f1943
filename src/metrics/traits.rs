//! Traits at the two seams of the sampler: where samples come from and where
//! derived values go.

/// A source of raw cumulative runtime samples.
///
/// Implementations must not surface errors: a missing, unreadable or
/// malformed source is reported as `None`.
pub trait SampleReader {
    /// Read the current cumulative runtime in milliseconds.
    fn read(&self) -> Option<f64>;
}

/// Destination for the values derived on each tick.
///
/// The Prometheus sink is the production implementation; tests substitute a
/// recording sink.
pub trait MetricsSink {
    /// Add `amount` milliseconds to the cumulative runtime counter.
    fn increment_counter(&self, amount: f64);

    /// Set the utilisation gauge to `value` percent.
    fn set_gauge(&self, value: f64);
}

impl<R: SampleReader + ?Sized> SampleReader for &R {
    fn read(&self) -> Option<f64> {
        (**self).read()
    }
}

impl<S: MetricsSink + ?Sized> MetricsSink for &S {
    fn increment_counter(&self, amount: f64) {
        (**self).increment_counter(amount)
    }

    fn set_gauge(&self, value: f64) {
        (**self).set_gauge(value)
    }
}

impl<S: MetricsSink + ?Sized> MetricsSink for std::sync::Arc<S> {
    fn increment_counter(&self, amount: f64) {
        (**self).increment_counter(amount)
    }

    fn set_gauge(&self, value: f64) {
        (**self).set_gauge(value)
    }
}
