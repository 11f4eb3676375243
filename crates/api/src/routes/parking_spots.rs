//! Parking spot endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::parking_spot::{
    CreateParkingSpotRequest, ListParkingSpotsQuery, UpdateParkingSpotRequest,
};
use domain::models::ParkingSpot;
use domain::services::{authorize_lot_filter, visibility};
use persistence::repositories::{ParkingSpotFilter, ParkingSpotRepository};
use tracing::info;
use validator::Validate;

use super::{ensure_lot_access, reject_empty};
use crate::app::AppState;
use crate::error::{ensure, ApiError, LOT_ACCESS_DENIED};
use crate::extractors::{ApiJson, ApiPath, ApiQuery, Caller, MaybeCaller};
use crate::response::{created, ok, ApiResponse};

const DUPLICATE_SPOT: &str = "Parking spot with this number already exists for this parking";

/// List spots ordered by spot number, optionally for one lot.
///
/// GET /api/parking-spots?parking_id=<id>
pub async fn list_parking_spots(
    State(state): State<AppState>,
    caller: MaybeCaller,
    ApiQuery(query): ApiQuery<ListParkingSpotsQuery>,
) -> Result<Json<ApiResponse<Vec<ParkingSpot>>>, ApiError> {
    let access = authorize_lot_filter(caller.identity(), query.parking_id, &state.lot_links()).await?;
    ensure(access, LOT_ACCESS_DENIED)?;

    let repo = ParkingSpotRepository::new(state.pool.clone());
    let spots = repo
        .find_all(ParkingSpotFilter {
            parking_id: query.parking_id,
            visibility: visibility(caller.identity()),
        })
        .await?
        .into_iter()
        .map(ParkingSpot::from)
        .collect();

    Ok(ok(spots))
}

/// GET /api/parking-spots/:id
pub async fn get_parking_spot(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<ParkingSpot>>, ApiError> {
    let repo = ParkingSpotRepository::new(state.pool.clone());
    let spot = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking spot"))?;

    Ok(ok(spot.into()))
}

/// POST /api/parking-spots
pub async fn create_parking_spot(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(request): ApiJson<CreateParkingSpotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ParkingSpot>>), ApiError> {
    request.validate()?;
    ensure_lot_access(&state, &identity, request.parking_id).await?;

    let repo = ParkingSpotRepository::new(state.pool.clone());
    let spot: ParkingSpot = repo
        .create(&request)
        .await
        .map_err(|e| ApiError::from_db(e, DUPLICATE_SPOT, "Parking not found"))?
        .into();

    info!(
        spot_id = spot.id,
        parking_id = spot.parking_id,
        spot_number = spot.spot_number,
        "Parking spot created"
    );

    Ok(created(spot))
}

/// Merge-patch a spot. `last_updated` moves forward on every successful update.
///
/// PUT /api/parking-spots/:id
pub async fn update_parking_spot(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateParkingSpotRequest>,
) -> Result<Json<ApiResponse<ParkingSpot>>, ApiError> {
    request.validate()?;
    reject_empty(&request)?;

    let repo = ParkingSpotRepository::new(state.pool.clone());
    let parking_id = repo
        .parking_id_of(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking spot"))?;
    ensure_lot_access(&state, &identity, parking_id).await?;

    let spot: ParkingSpot = repo
        .update(id, request)
        .await
        .map_err(|e| ApiError::from_db(e, DUPLICATE_SPOT, "Parking spot not found"))?
        .ok_or_else(|| ApiError::not_found("Parking spot"))?
        .into();

    info!(spot_id = spot.id, is_free = spot.is_free, "Parking spot updated");

    Ok(ok(spot))
}

/// DELETE /api/parking-spots/:id
pub async fn delete_parking_spot(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = ParkingSpotRepository::new(state.pool.clone());
    let parking_id = repo
        .parking_id_of(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking spot"))?;
    ensure_lot_access(&state, &identity, parking_id).await?;

    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Parking spot"));
    }

    info!(spot_id = id, parking_id = parking_id, "Parking spot deleted");

    Ok(StatusCode::NO_CONTENT)
}
