use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use price_optimizer::application::pricing::PredictionService;
use price_optimizer::domain::errors::ScoringError;
use price_optimizer::infrastructure::StaticScorer;
use price_optimizer::infrastructure::observability::Metrics;
use price_optimizer::interfaces::http::{self, AppState};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const ORIGIN: &str = "https://product-price-optimization-app-frontend.onrender.com";

fn app(scorer: &StaticScorer) -> Router {
    let service = PredictionService::new(Arc::new(scorer.clone()), Metrics::new().unwrap());
    http::router(AppState::new(service), &[ORIGIN.to_string()])
}

async fn post_predict(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).expect("response body must be JSON");
    (status, json)
}

#[tokio::test]
async fn test_liveness() {
    let scorer = StaticScorer::price(1.0);
    let response = app(&scorer)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Backend is running!");
}

#[tokio::test]
async fn test_successful_prediction_is_rounded() {
    let scorer = StaticScorer::price(92.3712);
    let body = json!({ "features": [100.0, 0.15, 4.5, 1200] }).to_string();

    let (status, json) = post_predict(app(&scorer), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "optimized_price": 92.37 }));
    assert_eq!(scorer.call_count(), 1);
    assert_eq!(scorer.received()[0].as_array(), [100.0, 0.15, 4.5, 1200.0]);
}

#[tokio::test]
async fn test_process_failure_response() {
    let scorer = StaticScorer::failing(ScoringError::ProcessFailed {
        exit_code: Some(1),
        stderr: "model file missing".to_string(),
    });
    let body = json!({ "features": [100.0, 0.15, 4.5, 1200] }).to_string();

    let (status, json) = post_predict(app(&scorer), body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({ "error": "Python script failed", "details": "model file missing" })
    );
}

#[tokio::test]
async fn test_parse_failure_response_includes_raw_output() {
    let scorer = StaticScorer::failing(ScoringError::InvalidOutput {
        raw_output: "NaN\n".to_string(),
        reason: "Non-finite numeric output from scorer: NaN".to_string(),
    });
    let body = json!({ "features": [100.0, 0.15, 4.5, 1200] }).to_string();

    let (status, json) = post_predict(app(&scorer), body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Parsing error");
    assert_eq!(json["raw"], "NaN\n");
    assert!(json["details"].as_str().unwrap().contains("NaN"));
}

#[tokio::test]
async fn test_timeout_response() {
    let scorer = StaticScorer::failing(ScoringError::TimedOut { timeout_secs: 30 });
    let body = json!({ "features": [100.0, 0.15, 4.5, 1200] }).to_string();

    let (status, json) = post_predict(app(&scorer), body).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"], "Python script timed out");
}

#[tokio::test]
async fn test_invalid_features_never_reach_the_scorer() {
    let bodies = [
        json!({ "features": "not-an-array" }),
        json!({}),
        json!({ "features": null }),
        json!({ "features": [1, 2, 3] }),
        json!({ "features": [1, 0.1, 3, 4, 5] }),
        json!({ "features": [100.0, "abc", 4.5, 1200] }),
        json!({ "features": [100.0, 0.15, 9.5, 1200] }),
        json!([100.0, 0.15, 4.5, 1200]),
    ];

    for body in bodies {
        let scorer = StaticScorer::price(10.0);
        let (status, json) = post_predict(app(&scorer), body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(json["error"].is_string(), "body: {body}");
        assert!(json.get("optimized_price").is_none());
        assert_eq!(scorer.call_count(), 0, "scorer invoked for body: {body}");
    }
}

#[tokio::test]
async fn test_not_an_array_message() {
    let scorer = StaticScorer::price(10.0);
    let body = json!({ "features": "not-an-array" }).to_string();

    let (status, json) = post_predict(app(&scorer), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "features must be an array" }));
    assert_eq!(scorer.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_body_is_json_error() {
    let scorer = StaticScorer::price(10.0);

    let (status, json) = post_predict(app(&scorer), "{\"features\": [1, 2,").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid JSON body");
    assert_eq!(scorer.call_count(), 0);
}

#[tokio::test]
async fn test_missing_content_type_keeps_unsupported_media_type_status() {
    let scorer = StaticScorer::price(10.0);
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from(
            json!({ "features": [100.0, 0.15, 4.5, 1200] }).to_string(),
        ))
        .unwrap();

    let response = app(&scorer).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).expect("response body must be JSON");
    assert_eq!(json["error"], "Invalid JSON body");
    assert_eq!(scorer.call_count(), 0);
}

#[tokio::test]
async fn test_identical_requests_give_identical_prices() {
    let scorer = StaticScorer::price(57.004);
    let body = json!({ "features": [250.0, 0.3, 3.9, 87] }).to_string();

    let (_, first) = post_predict(app(&scorer), body.clone()).await;
    let (_, second) = post_predict(app(&scorer), body).await;

    assert_eq!(first, second);
    assert_eq!(first["optimized_price"], 57.0);
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let scorer = StaticScorer::price(1.0);

    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/predict")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let allowed = app(&scorer).oneshot(preflight(ORIGIN)).await.unwrap();
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        ORIGIN
    );

    let denied = app(&scorer)
        .oneshot(preflight("https://evil.example.com"))
        .await
        .unwrap();
    assert!(
        denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
