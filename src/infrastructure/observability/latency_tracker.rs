use crate::infrastructure::observability::Metrics;
use std::time::Instant;

/// RAII guard around one scorer invocation.
///
/// Counts the invocation as active while alive and records its wall time in
/// `scorer_duration_seconds` when dropped, including when the owning future is
/// dropped mid-flight.
pub struct InvocationGuard<'a> {
    start: Instant,
    metrics: &'a Metrics,
}

impl<'a> InvocationGuard<'a> {
    pub fn enter(metrics: &'a Metrics) -> Self {
        metrics.scorer_processes_active.inc();
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

impl Drop for InvocationGuard<'_> {
    fn drop(&mut self) {
        self.metrics.scorer_processes_active.dec();
        self.metrics
            .scorer_duration_seconds
            .observe(self.start.elapsed().as_secs_f64());
    }
}
