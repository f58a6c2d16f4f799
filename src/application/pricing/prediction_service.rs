use crate::domain::ports::Scorer;
use crate::domain::pricing::{FeatureVector, InvocationOutcome};
use crate::infrastructure::observability::{InvocationGuard, Metrics};
use std::sync::Arc;
use tracing::{error, info};

/// Runs one scorer invocation per request and records its outcome.
///
/// Holds no per-request state; the same instance serves concurrent requests.
pub struct PredictionService {
    scorer: Arc<dyn Scorer>,
    metrics: Metrics,
}

impl PredictionService {
    pub fn new(scorer: Arc<dyn Scorer>, metrics: Metrics) -> Self {
        Self { scorer, metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub async fn predict(&self, features: &FeatureVector) -> InvocationOutcome {
        let outcome = {
            let invocation = InvocationGuard::enter(&self.metrics);
            let outcome = self.scorer.score(features).await;
            info!(
                "Scorer '{}' finished in {}ms",
                self.scorer.name(),
                invocation.elapsed_ms()
            );
            outcome
        };

        match &outcome {
            Ok(result) => {
                self.metrics.record_success();
                info!(
                    "Prediction for {:?}: {:.2}",
                    features.as_array(),
                    result.rounded()
                );
            }
            Err(e) => {
                self.metrics.record_failure(e.kind());
                error!(
                    "Prediction for {:?} failed ({}): {}",
                    features.as_array(),
                    e.kind().as_str(),
                    e
                );
            }
        }

        outcome
    }
}
