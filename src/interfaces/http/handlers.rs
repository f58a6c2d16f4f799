use super::AppState;
use super::dto::PredictResponse;
use super::error::ApiError;
use crate::domain::errors::ErrorKind;
use crate::domain::pricing::FeatureVector;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;
use tracing::warn;

pub const LIVENESS_MESSAGE: &str = "Backend is running!";

/// `GET /`
pub async fn health() -> &'static str {
    LIVENESS_MESSAGE
}

/// `POST /predict`
///
/// Validation happens before the scorer is touched: a rejected request never
/// launches a process.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let metrics = state.service.metrics();

    let Json(body) = payload.map_err(|rejection| {
        warn!(
            "Rejected prediction request body ({}): {}",
            rejection.status(),
            rejection.body_text()
        );
        metrics.record_failure(ErrorKind::Validation);
        ApiError::MalformedBody {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    })?;

    let features = FeatureVector::from_json(body.get("features")).map_err(|e| {
        warn!("Rejected prediction request: {}", e);
        metrics.record_failure(e.kind());
        e
    })?;

    let result = state.service.predict(&features).await?;

    Ok(Json(PredictResponse {
        optimized_price: result.rounded(),
    }))
}
