//! Camera-to-lot link endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::parking_camera::{ListParkingCamerasQuery, ParkingCameraKey};
use domain::models::ParkingCamera;
use domain::services::require_service_admin;
use persistence::repositories::ParkingCameraRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::{ensure, ApiError};
use crate::extractors::{ApiJson, ApiPath, ApiQuery, Caller};
use crate::response::{created, ok, ApiResponse};

const MANAGE_DENIED: &str = "Only service admin can manage parking-camera relationships";

/// GET /api/parking-cameras?parking_id=&camera_id=
pub async fn list_parking_cameras(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListParkingCamerasQuery>,
) -> Result<Json<ApiResponse<Vec<ParkingCamera>>>, ApiError> {
    let repo = ParkingCameraRepository::new(state.pool.clone());
    let links = repo
        .find_all(&query)
        .await?
        .into_iter()
        .map(ParkingCamera::from)
        .collect();

    Ok(ok(links))
}

/// GET /api/parking-cameras/:id
pub async fn get_parking_camera(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<ParkingCamera>>, ApiError> {
    let repo = ParkingCameraRepository::new(state.pool.clone());
    let link = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking camera relationship"))?;

    Ok(ok(link.into()))
}

/// POST /api/parking-cameras
pub async fn create_parking_camera(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(key): ApiJson<ParkingCameraKey>,
) -> Result<(StatusCode, Json<ApiResponse<ParkingCamera>>), ApiError> {
    ensure(require_service_admin(Some(&identity)), MANAGE_DENIED)?;
    key.validate()?;

    let repo = ParkingCameraRepository::new(state.pool.clone());
    let link: ParkingCamera = repo
        .create(key)
        .await
        .map_err(|e| {
            ApiError::from_db(
                e,
                "This parking-camera relationship already exists",
                "Parking or camera not found",
            )
        })?
        .into();

    info!(
        link_id = link.id,
        parking_id = link.parking_id,
        camera_id = link.camera_id,
        "Camera linked to parking"
    );

    Ok(created(link))
}

/// DELETE /api/parking-cameras/:id
pub async fn delete_parking_camera(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    ensure(require_service_admin(Some(&identity)), MANAGE_DENIED)?;

    let repo = ParkingCameraRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Parking camera relationship"));
    }

    info!(link_id = id, "Parking-camera link deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete by the `(parking_id, camera_id)` pair in the body.
///
/// DELETE /api/parking-cameras/relation/remove
pub async fn delete_parking_camera_by_pair(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(key): ApiJson<ParkingCameraKey>,
) -> Result<StatusCode, ApiError> {
    ensure(require_service_admin(Some(&identity)), MANAGE_DENIED)?;
    key.validate()?;

    let repo = ParkingCameraRepository::new(state.pool.clone());
    if !repo.delete_by_pair(key).await? {
        return Err(ApiError::not_found("Parking camera relationship"));
    }

    info!(
        parking_id = key.parking_id,
        camera_id = key.camera_id,
        "Parking-camera link deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
