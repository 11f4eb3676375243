//! Occupancy history endpoint handlers.
//!
//! History rows are snapshots: they are created and deleted, never edited.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::parking_history::{CreateParkingHistoryRequest, ListParkingHistoryQuery};
use domain::models::ParkingHistory;
use domain::services::{authorize_lot_filter, visibility};
use persistence::repositories::{ParkingHistoryFilter, ParkingHistoryRepository};
use tracing::info;
use validator::Validate;

use super::ensure_lot_access;
use crate::app::AppState;
use crate::error::{ensure, ApiError, LOT_ACCESS_DENIED};
use crate::extractors::{ApiJson, ApiPath, ApiQuery, Caller, MaybeCaller};
use crate::response::{created, ok, ApiResponse};

/// Newest first. `start_date`/`end_date` bound `recorded_at` inclusively.
///
/// GET /api/parking-history?parking_id=&start_date=&end_date=
pub async fn list_parking_history(
    State(state): State<AppState>,
    caller: MaybeCaller,
    ApiQuery(query): ApiQuery<ListParkingHistoryQuery>,
) -> Result<Json<ApiResponse<Vec<ParkingHistory>>>, ApiError> {
    let recorded = query.recorded_range().map_err(ApiError::Validation)?;

    let access = authorize_lot_filter(caller.identity(), query.parking_id, &state.lot_links()).await?;
    ensure(access, LOT_ACCESS_DENIED)?;

    let repo = ParkingHistoryRepository::new(state.pool.clone());
    let history = repo
        .find_all(ParkingHistoryFilter {
            parking_id: query.parking_id,
            recorded,
            visibility: visibility(caller.identity()),
        })
        .await?
        .into_iter()
        .map(ParkingHistory::from)
        .collect();

    Ok(ok(history))
}

/// GET /api/parking-history/:id
pub async fn get_parking_history(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<ParkingHistory>>, ApiError> {
    let repo = ParkingHistoryRepository::new(state.pool.clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking history record"))?;

    Ok(ok(record.into()))
}

/// POST /api/parking-history
pub async fn create_parking_history(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(request): ApiJson<CreateParkingHistoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ParkingHistory>>), ApiError> {
    request.validate()?;
    ensure_lot_access(&state, &identity, request.parking_id).await?;

    let repo = ParkingHistoryRepository::new(state.pool.clone());
    let record: ParkingHistory = repo
        .create(&request)
        .await
        .map_err(|e| {
            ApiError::from_db(e, "Parking history record already exists", "Parking not found")
        })?
        .into();

    info!(
        history_id = record.id,
        parking_id = record.parking_id,
        spots = record.spots_state.len(),
        "Parking history recorded"
    );

    Ok(created(record))
}

/// DELETE /api/parking-history/:id
pub async fn delete_parking_history(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = ParkingHistoryRepository::new(state.pool.clone());
    let parking_id = repo
        .parking_id_of(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking history record"))?;
    ensure_lot_access(&state, &identity, parking_id).await?;

    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Parking history record"));
    }

    info!(history_id = id, parking_id = parking_id, "Parking history record deleted");

    Ok(StatusCode::NO_CONTENT)
}
