use crate::domain::errors::ScoringError;

/// Optimized price produced by one successful scorer invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    value: f64,
}

impl PredictionResult {
    /// Returns `None` for NaN or infinite values.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self { value })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Price rounded to 2 decimal places for presentation.
    pub fn rounded(&self) -> f64 {
        round_to_cents(self.value)
    }
}

/// Result of one spawn-collect-parse cycle.
pub type InvocationOutcome = Result<PredictionResult, ScoringError>;

/// Values too large to scale by 100 have no fractional cents and pass through.
pub fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Strict parse of a scorer's stdout: the whole trimmed text must be one
/// finite decimal number.
pub fn parse_scorer_output(raw: &str) -> InvocationOutcome {
    let trimmed = raw.trim();
    let invalid = |reason: String| ScoringError::InvalidOutput {
        raw_output: raw.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("Scorer produced no output".to_string()));
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| invalid(format!("Invalid numeric output from scorer: {}", trimmed)))?;

    PredictionResult::new(value)
        .ok_or_else(|| invalid(format!("Non-finite numeric output from scorer: {}", trimmed)))
}
