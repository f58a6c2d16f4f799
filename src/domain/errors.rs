use thiserror::Error;

/// Coarse classification of a failed prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Process,
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Process => "process",
            ErrorKind::Parse => "parse",
        }
    }
}

/// Errors raised while turning a request payload into a `FeatureVector`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("features must be an array")]
    NotAnArray,

    #[error("features must contain exactly {expected} values, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("features[{index}] ({name}) must be a finite number")]
    NotNumeric { index: usize, name: &'static str },

    #[error("features[{index}] ({name}) = {value} is out of range: {constraint}")]
    OutOfRange {
        index: usize,
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Errors raised by a scorer invocation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("failed to launch scorer `{program}`: {reason}")]
    Launch { program: String, reason: String },

    #[error("scorer exited with {}: {stderr}", exit_label(.exit_code))]
    ProcessFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("scorer did not finish within {timeout_secs}s")]
    TimedOut { timeout_secs: u64 },

    #[error("{reason}")]
    InvalidOutput { raw_output: String, reason: String },
}

impl ScoringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoringError::Launch { .. }
            | ScoringError::ProcessFailed { .. }
            | ScoringError::TimedOut { .. } => ErrorKind::Process,
            ScoringError::InvalidOutput { .. } => ErrorKind::Parse,
        }
    }

    /// Diagnostic text surfaced to the client next to the error summary.
    pub fn details(&self) -> String {
        match self {
            ScoringError::Launch { .. } | ScoringError::TimedOut { .. } => self.to_string(),
            ScoringError::ProcessFailed { stderr, .. } => stderr.clone(),
            ScoringError::InvalidOutput { reason, .. } => reason.clone(),
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
