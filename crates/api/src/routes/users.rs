//! User account endpoint handlers. Service admin only, reads included.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::app_user::{CreateAppUserRequest, UpdateAppUserRequest};
use domain::models::AppUser;
use domain::services::require_user_admin;
use persistence::repositories::AppUserRepository;
use tracing::info;
use validator::Validate;

use super::reject_empty;
use crate::app::AppState;
use crate::error::{ensure, ApiError};
use crate::extractors::{ApiJson, ApiPath, Caller};
use crate::response::{created, ok, ApiResponse};
use crate::services::auth::hash_in_background;

const DUPLICATE_USERNAME: &str = "Username already exists";

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Caller(identity): Caller,
) -> Result<Json<ApiResponse<Vec<AppUser>>>, ApiError> {
    ensure(
        require_user_admin(Some(&identity)),
        "Only service admin can view users",
    )?;

    let repo = AppUserRepository::new(state.pool.clone());
    let users = repo.find_all().await?.into_iter().map(AppUser::from).collect();

    Ok(ok(users))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<AppUser>>, ApiError> {
    ensure(
        require_user_admin(Some(&identity)),
        "Only service admin can view users",
    )?;

    let repo = AppUserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(ok(user.into()))
}

/// The response never carries the password hash.
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(request): ApiJson<CreateAppUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AppUser>>), ApiError> {
    ensure(
        require_user_admin(Some(&identity)),
        "Only service admin can create users",
    )?;
    request.validate()?;

    let password_hash = hash_in_background(request.password).await?;

    let repo = AppUserRepository::new(state.pool.clone());
    let user: AppUser = repo
        .create(
            &request.username,
            &password_hash,
            request.role,
            request.is_active,
        )
        .await
        .map_err(|e| ApiError::from_db(e, DUPLICATE_USERNAME, "User not found"))?
        .into();

    info!(
        user_id = user.id,
        role = %user.role,
        created_by = identity.user_id,
        "User created"
    );

    Ok(created(user))
}

/// A new password is hashed before it reaches storage.
///
/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateAppUserRequest>,
) -> Result<Json<ApiResponse<AppUser>>, ApiError> {
    ensure(
        require_user_admin(Some(&identity)),
        "Only service admin can update users",
    )?;
    request.validate()?;
    reject_empty(&request)?;

    let (password, mut changes) = request.into_parts();
    if let Some(password) = password {
        changes.password_hash = Some(hash_in_background(password).await?);
    }

    let repo = AppUserRepository::new(state.pool.clone());
    let user: AppUser = repo
        .update(id, changes)
        .await
        .map_err(|e| ApiError::from_db(e, DUPLICATE_USERNAME, "User not found"))?
        .ok_or_else(|| ApiError::not_found("User"))?
        .into();

    info!(user_id = user.id, updated_by = identity.user_id, "User updated");

    Ok(ok(user))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    ensure(
        require_user_admin(Some(&identity)),
        "Only service admin can delete users",
    )?;

    let repo = AppUserRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("User"));
    }

    info!(user_id = id, deleted_by = identity.user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
