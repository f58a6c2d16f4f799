use super::dto::ErrorResponse;
use crate::domain::errors::{ScoringError, ValidationError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const SCRIPT_FAILED: &str = "Python script failed";
pub const SCRIPT_TIMED_OUT: &str = "Python script timed out";
pub const PARSING_ERROR: &str = "Parsing error";
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// Every way a request can fail, mapped to a status and a JSON body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("Invalid JSON body: {reason}")]
    MalformedBody { status: StatusCode, reason: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody { status, .. } => *status,
            ApiError::Scoring(ScoringError::TimedOut { .. }) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Validation(e) => ErrorResponse::new(e.to_string()),
            ApiError::MalformedBody { reason, .. } => {
                ErrorResponse::new(INVALID_JSON_BODY).with_details(reason.clone())
            }
            ApiError::Scoring(e @ (ScoringError::Launch { .. } | ScoringError::ProcessFailed { .. })) => {
                ErrorResponse::new(SCRIPT_FAILED).with_details(e.details())
            }
            ApiError::Scoring(e @ ScoringError::TimedOut { .. }) => {
                ErrorResponse::new(SCRIPT_TIMED_OUT).with_details(e.details())
            }
            ApiError::Scoring(ScoringError::InvalidOutput { raw_output, reason }) => {
                ErrorResponse::new(PARSING_ERROR)
                    .with_details(reason.clone())
                    .with_raw(raw_output.clone())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::from(ValidationError::NotAnArray);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body(), ErrorResponse::new("features must be an array"));
    }

    #[test]
    fn test_process_failure_body() {
        let err = ApiError::from(ScoringError::ProcessFailed {
            exit_code: Some(1),
            stderr: "model file missing".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body(),
            ErrorResponse::new("Python script failed").with_details("model file missing")
        );
    }

    #[test]
    fn test_launch_failure_uses_script_failed_summary() {
        let err = ApiError::from(ScoringError::Launch {
            program: "python3".to_string(),
            reason: "No such file or directory (os error 2)".to_string(),
        });
        let body = err.body();
        assert_eq!(body.error, SCRIPT_FAILED);
        assert!(body.details.unwrap().contains("python3"));
    }

    #[test]
    fn test_timeout_maps_to_gateway_timeout() {
        let err = ApiError::from(ScoringError::TimedOut { timeout_secs: 30 });
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.body().error, SCRIPT_TIMED_OUT);
    }

    #[test]
    fn test_parse_failure_carries_raw_output() {
        let err = ApiError::from(ScoringError::InvalidOutput {
            raw_output: "NaN\n".to_string(),
            reason: "Non-finite numeric output from scorer: NaN".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.body();
        assert_eq!(body.error, "Parsing error");
        assert_eq!(body.raw.as_deref(), Some("NaN\n"));
    }

    #[test]
    fn test_malformed_body_keeps_rejection_status() {
        let err = ApiError::MalformedBody {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            reason: "length limit exceeded".to_string(),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            err.body(),
            ErrorResponse::new(INVALID_JSON_BODY).with_details("length limit exceeded")
        );
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_string(&ErrorResponse::new("features must be an array")).unwrap();
        assert_eq!(json, r#"{"error":"features must be an array"}"#);
    }
}
