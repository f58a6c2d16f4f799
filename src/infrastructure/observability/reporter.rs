//! Push-based metrics reporter for the price optimizer
//!
//! Periodically outputs prediction metrics as structured JSON to stdout.
//! The server exposes no metrics endpoint; this is the only outbound channel.

use crate::domain::errors::ErrorKind;
use crate::infrastructure::observability::metrics::{Metrics, OUTCOME_SUCCESS};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Metrics snapshot for JSON output
#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub predictions: PredictionSnapshot,
    pub scorer: ScorerSnapshot,
}

#[derive(Serialize)]
pub struct PredictionSnapshot {
    pub success: u64,
    pub validation_errors: u64,
    pub process_errors: u64,
    pub parse_errors: u64,
}

#[derive(Serialize)]
pub struct ScorerSnapshot {
    pub invocations: u64,
    pub active_processes: u64,
    pub mean_duration_seconds: f64,
}

/// Push-based metrics reporter
///
/// Outputs metrics as structured JSON logs on a configurable interval.
pub struct MetricsReporter {
    metrics: Metrics,
    start_time: Instant,
    interval: Duration,
}

impl MetricsReporter {
    /// Create a new metrics reporter
    ///
    /// # Arguments
    /// * `metrics` - Prometheus metrics shared with the prediction service
    /// * `interval_seconds` - How often to output metrics (default: 60)
    pub fn new(metrics: Metrics, interval_seconds: u64) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds),
        }
    }

    /// Run the reporter in a loop, outputting metrics periodically
    pub async fn run(self) {
        info!(
            "MetricsReporter: Starting push-based metrics (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    // Prefixed so log pipelines can filter on it
                    println!("METRICS_JSON:{}", json);
                    info!(
                        "Predictions: {} ok / {} failed | Active scorers: {} | Uptime: {}s",
                        snapshot.predictions.success,
                        snapshot.predictions.validation_errors
                            + snapshot.predictions.process_errors
                            + snapshot.predictions.parse_errors,
                        snapshot.scorer.active_processes,
                        snapshot.uptime_seconds
                    );
                }
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
        }
    }

    /// Collect current metrics snapshot
    pub fn collect_snapshot(&self) -> MetricsSnapshot {
        let uptime = self.start_time.elapsed().as_secs();
        self.metrics.uptime_seconds.set(uptime as f64);

        let histogram = &self.metrics.scorer_duration_seconds;
        let invocations = histogram.get_sample_count();
        let mean_duration_seconds = if invocations > 0 {
            histogram.get_sample_sum() / invocations as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            predictions: PredictionSnapshot {
                success: self.metrics.outcome_count(OUTCOME_SUCCESS),
                validation_errors: self.metrics.outcome_count(ErrorKind::Validation.as_str()),
                process_errors: self.metrics.outcome_count(ErrorKind::Process.as_str()),
                parse_errors: self.metrics.outcome_count(ErrorKind::Parse.as_str()),
            },
            scorer: ScorerSnapshot {
                invocations,
                active_processes: self.metrics.scorer_processes_active.get().max(0.0) as u64,
                mean_duration_seconds,
            },
        }
    }
}
