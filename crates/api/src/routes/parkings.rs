//! Parking lot endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::parking::{CreateParkingRequest, UpdateParkingRequest};
use domain::models::Parking;
use domain::services::{require_service_admin, visibility};
use persistence::repositories::ParkingRepository;
use tracing::info;
use validator::Validate;

use super::{ensure_lot_access, reject_empty};
use crate::app::AppState;
use crate::error::{ensure, ApiError};
use crate::extractors::{ApiJson, ApiPath, Caller, MaybeCaller};
use crate::response::{created, ok, ApiResponse};

/// List lots. Parking administrators only see lots they are linked to.
///
/// GET /api/parkings
pub async fn list_parkings(
    State(state): State<AppState>,
    caller: MaybeCaller,
) -> Result<Json<ApiResponse<Vec<Parking>>>, ApiError> {
    let repo = ParkingRepository::new(state.pool.clone());
    let parkings = repo
        .find_all(visibility(caller.identity()))
        .await?
        .into_iter()
        .map(Parking::from)
        .collect();

    Ok(ok(parkings))
}

/// GET /api/parkings/:id
pub async fn get_parking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Parking>>, ApiError> {
    let repo = ParkingRepository::new(state.pool.clone());
    let parking = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking"))?;

    Ok(ok(parking.into()))
}

/// POST /api/parkings
pub async fn create_parking(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(request): ApiJson<CreateParkingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Parking>>), ApiError> {
    ensure(
        require_service_admin(Some(&identity)),
        "Only service admin can create parkings",
    )?;
    request.validate()?;

    let repo = ParkingRepository::new(state.pool.clone());
    let parking: Parking = repo.create(&request).await?.into();

    info!(parking_id = parking.id, user_id = identity.user_id, "Parking created");

    Ok(created(parking))
}

/// Merge-patch a lot. Linked parking administrators may edit their lots.
///
/// PUT /api/parkings/:id
pub async fn update_parking(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateParkingRequest>,
) -> Result<Json<ApiResponse<Parking>>, ApiError> {
    request.validate()?;
    reject_empty(&request)?;
    ensure_lot_access(&state, &identity, id).await?;

    let repo = ParkingRepository::new(state.pool.clone());
    let parking: Parking = repo
        .update(id, request)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking"))?
        .into();

    info!(parking_id = parking.id, user_id = identity.user_id, "Parking updated");

    Ok(ok(parking))
}

/// Deleting a lot also removes its spots, history and links.
///
/// DELETE /api/parkings/:id
pub async fn delete_parking(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    ensure(
        require_service_admin(Some(&identity)),
        "Only service admin can delete parkings",
    )?;

    let repo = ParkingRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Parking"));
    }

    info!(parking_id = id, user_id = identity.user_id, "Parking deleted");

    Ok(StatusCode::NO_CONTENT)
}
