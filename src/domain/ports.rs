use crate::domain::pricing::{FeatureVector, InvocationOutcome};
use async_trait::async_trait;

/// Interface for price scoring models.
///
/// Implementations may run the model out of process (`ProcessScorer`) or in
/// process; the HTTP layer only depends on this trait.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Score one feature vector. Exactly one model evaluation per call, no retry.
    async fn score(&self, features: &FeatureVector) -> InvocationOutcome;

    /// Get scorer name/type
    fn name(&self) -> &str;
}
