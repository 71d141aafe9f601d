//! Health check handlers
//!
//! Liveness never touches the store; readiness pings it.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Simple status indicator for load balancers and health monitoring.
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
}

/// GET /healthz and GET /health/liveness
///
/// # Example
/// ```bash
/// curl http://localhost:8080/healthz
/// # Returns: {"status":"ok"}
/// ```
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse { status: "ok" })
}

/// GET /health/readiness
///
/// Answers 503 with `{"status":"unavailable"}` when the store cannot be
/// reached.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthCheckResponse>) {
    match state.repository.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthCheckResponse { status: "ok" })),
        Err(e) => {
            tracing::error!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthCheckResponse {
                    status: "unavailable",
                }),
            )
        }
    }
}
