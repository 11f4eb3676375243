//! Error envelope for requests cut off by the timeout layer.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// tower-http's `TimeoutLayer` answers with a bare 408. Handlers never produce
/// that status themselves, so any 408 coming back is rewritten into the usual
/// error body.
pub async fn timeout_envelope(req: Request<Body>, next: Next) -> Response {
    let response = next.run(req).await;
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!("Request timed out");
    ApiError::Timeout.into_response()
}
