use crate::domain::errors::ScoringError;
use crate::domain::ports::Scorer;
use crate::domain::pricing::{FeatureVector, InvocationOutcome, PredictionResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

/// In-process scorer that always answers with the same outcome.
///
/// Records every feature vector it receives so tests can assert on what
/// reached the scoring step, and how often.
#[derive(Clone)]
pub struct StaticScorer {
    outcome: InvocationOutcome,
    calls: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<FeatureVector>>>,
}

impl StaticScorer {
    pub fn new(outcome: InvocationOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Scorer that always returns `price`. Non-finite prices become a parse failure.
    pub fn price(price: f64) -> Self {
        let outcome = PredictionResult::new(price).ok_or(ScoringError::InvalidOutput {
            raw_output: price.to_string(),
            reason: format!("Non-finite numeric output from scorer: {}", price),
        });
        Self::new(outcome)
    }

    pub fn failing(error: ScoringError) -> Self {
        Self::new(Err(error))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<FeatureVector> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Scorer for StaticScorer {
    async fn score(&self, features: &FeatureVector) -> InvocationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut received) = self.received.lock() {
            received.push(features.clone());
        }
        info!("StaticScorer: scoring {:?}", features.as_array());
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        "static"
    }
}
