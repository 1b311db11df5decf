/*!
 * HTTP service boundary.
 *
 * Exposes the request pipeline as `POST /api`. The response body is either
 * the payload object or the JSON empty string `""` for the short-circuit
 * case — an empty result is a distinguishable falsy response, not a 4xx.
 * Cross-origin requests are unrestricted.
 */

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::errors::PipelineError;
use crate::pipeline::{ClassifyRequest, PipelineOutcome, RequestPipeline};

/// Shared per-process state: the pipeline and the request deadline
pub struct AppState {
    /// The request pipeline
    pub pipeline: RequestPipeline,
    /// Per-request deadline
    pub request_timeout: Duration,
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", post(classify_handler))
        .route("/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let bind_address = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}/api", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}

/// Classify a complaint message
async fn classify_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClassifyRequest>,
) -> Response {
    let result = tokio::time::timeout(
        state.request_timeout,
        state.pipeline.process(&request.message),
    )
    .await;

    match result {
        Ok(Ok(PipelineOutcome::Matched(payload))) => Json(payload).into_response(),
        // The observed contract: short-circuits answer 200 with JSON ""
        Ok(Ok(PipelineOutcome::NoMatch)) => Json("").into_response(),
        Ok(Err(e @ PipelineError::Translation(_))) => {
            error!("Request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "translation failed" })),
            )
                .into_response()
        }
        Ok(Err(e)) => {
            error!("Request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response()
        }
        Err(_) => {
            let e = PipelineError::DeadlineExpired(state.request_timeout.as_secs());
            error!("Request failed: {}", e);
            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({ "error": "request timed out" })),
            )
                .into_response()
        }
    }
}

/// Liveness probe
async fn health_handler() -> &'static str {
    "ok"
}
