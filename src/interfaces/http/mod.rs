//! HTTP surface: `GET /` liveness and `POST /predict`.
//!
//! Routes and middleware are composed explicitly by `router`; nothing is
//! registered globally.

pub mod dto;
pub mod error;
pub mod handlers;

use crate::application::pricing::PredictionService;
use crate::config::ServerEnvConfig;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Only the configured origins, GET and POST.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve(
    config: &ServerEnvConfig,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = router(state, &config.allowed_origins);

    let addr: SocketAddr = config.listen_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on port {}", config.port);
    info!("CORS allowed origins: {:?}", config.allowed_origins);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
