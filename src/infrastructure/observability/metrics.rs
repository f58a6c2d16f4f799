//! Prometheus metrics definitions for the price optimizer
//!
//! All metrics use the `price_optimizer_` prefix.

use crate::domain::errors::ErrorKind;
use prometheus::{
    CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry,
    core::{AtomicF64, GenericGauge},
};

pub const OUTCOME_SUCCESS: &str = "success";

/// Prometheus metrics for the prediction pipeline
#[derive(Clone)]
pub struct Metrics {
    /// Prediction requests by outcome (success, validation, process, parse)
    pub predictions_total: CounterVec,
    /// Wall time of one scorer invocation, spawn to exit
    pub scorer_duration_seconds: Histogram,
    /// Scorer processes currently running
    pub scorer_processes_active: GenericGauge<AtomicF64>,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance.
    ///
    /// Collectors go through a local registry so duplicate or malformed
    /// metric names fail at startup.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let predictions_total = CounterVec::new(
            Opts::new(
                "price_optimizer_predictions_total",
                "Total prediction requests by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let scorer_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "price_optimizer_scorer_duration_seconds",
                "Scorer process wall time in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(scorer_duration_seconds.clone()))?;

        let scorer_processes_active = Gauge::with_opts(Opts::new(
            "price_optimizer_scorer_processes_active",
            "Scorer processes currently running",
        ))?;
        registry.register(Box::new(scorer_processes_active.clone()))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "price_optimizer_uptime_seconds",
            "Server uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            predictions_total,
            scorer_duration_seconds,
            scorer_processes_active,
            uptime_seconds,
        })
    }

    pub fn record_success(&self) {
        self.predictions_total
            .with_label_values(&[OUTCOME_SUCCESS])
            .inc();
    }

    pub fn record_failure(&self, kind: ErrorKind) {
        self.predictions_total
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn outcome_count(&self, outcome: &str) -> u64 {
        self.predictions_total.with_label_values(&[outcome]).get() as u64
    }
}
