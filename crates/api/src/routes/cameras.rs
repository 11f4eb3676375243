//! Camera endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::camera::{CreateCameraRequest, UpdateCameraRequest};
use domain::models::Camera;
use domain::services::require_service_admin;
use persistence::repositories::CameraRepository;
use tracing::info;
use validator::Validate;

use super::reject_empty;
use crate::app::AppState;
use crate::error::{ensure, ApiError};
use crate::extractors::{ApiJson, ApiPath, Caller};
use crate::response::{created, ok, ApiResponse};

/// GET /api/cameras
pub async fn list_cameras(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Camera>>>, ApiError> {
    let repo = CameraRepository::new(state.pool.clone());
    let cameras = repo.find_all().await?.into_iter().map(Camera::from).collect();

    Ok(ok(cameras))
}

/// GET /api/cameras/:id
pub async fn get_camera(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Camera>>, ApiError> {
    let repo = CameraRepository::new(state.pool.clone());
    let camera = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Camera"))?;

    Ok(ok(camera.into()))
}

/// POST /api/cameras
pub async fn create_camera(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(request): ApiJson<CreateCameraRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Camera>>), ApiError> {
    ensure(
        require_service_admin(Some(&identity)),
        "Only service admin can create cameras",
    )?;
    request.validate()?;

    let repo = CameraRepository::new(state.pool.clone());
    let camera: Camera = repo.create(&request).await?.into();

    info!(camera_id = camera.id, "Camera created");

    Ok(created(camera))
}

/// PUT /api/cameras/:id
pub async fn update_camera(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateCameraRequest>,
) -> Result<Json<ApiResponse<Camera>>, ApiError> {
    ensure(
        require_service_admin(Some(&identity)),
        "Only service admin can update cameras",
    )?;
    request.validate()?;
    reject_empty(&request)?;

    let repo = CameraRepository::new(state.pool.clone());
    let camera: Camera = repo
        .update(id, request)
        .await?
        .ok_or_else(|| ApiError::not_found("Camera"))?
        .into();

    info!(camera_id = camera.id, "Camera updated");

    Ok(ok(camera))
}

/// DELETE /api/cameras/:id
pub async fn delete_camera(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    ensure(
        require_service_admin(Some(&identity)),
        "Only service admin can delete cameras",
    )?;

    let repo = CameraRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Camera"));
    }

    info!(camera_id = id, "Camera deleted");

    Ok(StatusCode::NO_CONTENT)
}
