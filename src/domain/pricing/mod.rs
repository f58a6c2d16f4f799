pub mod feature_vector;
pub mod prediction;

pub use feature_vector::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use prediction::{InvocationOutcome, PredictionResult, parse_scorer_output, round_to_cents};
