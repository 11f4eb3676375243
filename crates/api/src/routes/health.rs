//! Health check endpoint handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Liveness. Always 200, never touches the database.
///
/// GET /health
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "Server is running",
    })
}

/// Readiness: the service can reach its database.
///
/// GET /health/ready
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    match persistence::db::ping(&state.pool).await {
        Ok(()) => Ok(Json(StatusResponse {
            status: "ready",
            message: "Database reachable",
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            Err(ApiError::ServiceUnavailable(
                "Database unavailable".to_string(),
            ))
        }
    }
}
