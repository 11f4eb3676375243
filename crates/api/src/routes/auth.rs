//! Authentication endpoint handlers.

use axum::{extract::State, Json};
use domain::models::{AppUser, LoginRequest, LoginResponse};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, Caller};
use crate::response::{ok, ApiResponse};
use crate::services::AuthService;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if request.validate().is_err() {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let service = AuthService::new(state.pool.clone(), state.jwt.clone());
    let response = service.login(&request.username, &request.password).await?;

    Ok(ok(response))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Caller(identity): Caller,
) -> Result<Json<ApiResponse<AppUser>>, ApiError> {
    let service = AuthService::new(state.pool.clone(), state.jwt.clone());
    let user = service.current_user(identity.user_id).await?;

    Ok(ok(user))
}
