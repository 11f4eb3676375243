//! User-to-lot grant endpoint handlers.
//!
//! These rows are what scope a parking administrator to their lots.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::user_parking::{ListUserParkingsQuery, UserParkingKey};
use domain::models::UserParking;
use domain::services::require_service_admin;
use persistence::repositories::UserParkingRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::{ensure, ApiError};
use crate::extractors::{ApiJson, ApiPath, ApiQuery, Caller};
use crate::response::{created, ok, ApiResponse};

const MANAGE_DENIED: &str = "Only service admin can manage user-parking relationships";

/// GET /api/user-parkings?user_id=&parking_id=
pub async fn list_user_parkings(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListUserParkingsQuery>,
) -> Result<Json<ApiResponse<Vec<UserParking>>>, ApiError> {
    let repo = UserParkingRepository::new(state.pool.clone());
    let links = repo
        .find_all(&query)
        .await?
        .into_iter()
        .map(UserParking::from)
        .collect();

    Ok(ok(links))
}

/// GET /api/user-parkings/:id
pub async fn get_user_parking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<UserParking>>, ApiError> {
    let repo = UserParkingRepository::new(state.pool.clone());
    let link = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User parking relationship"))?;

    Ok(ok(link.into()))
}

/// POST /api/user-parkings
pub async fn create_user_parking(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(key): ApiJson<UserParkingKey>,
) -> Result<(StatusCode, Json<ApiResponse<UserParking>>), ApiError> {
    ensure(require_service_admin(Some(&identity)), MANAGE_DENIED)?;
    key.validate()?;

    let repo = UserParkingRepository::new(state.pool.clone());
    let link: UserParking = repo
        .create(key)
        .await
        .map_err(|e| {
            ApiError::from_db(
                e,
                "This user-parking relationship already exists",
                "User or parking not found",
            )
        })?
        .into();

    info!(
        link_id = link.id,
        parking_id = link.parking_id,
        user_id = link.user_id,
        "User granted parking access"
    );

    Ok(created(link))
}

/// DELETE /api/user-parkings/:id
pub async fn delete_user_parking(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    ensure(require_service_admin(Some(&identity)), MANAGE_DENIED)?;

    let repo = UserParkingRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("User parking relationship"));
    }

    info!(link_id = id, "User-parking grant deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete by the `(user_id, parking_id)` pair in the body.
///
/// DELETE /api/user-parkings/relation/remove
pub async fn delete_user_parking_by_pair(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiJson(key): ApiJson<UserParkingKey>,
) -> Result<StatusCode, ApiError> {
    ensure(require_service_admin(Some(&identity)), MANAGE_DENIED)?;
    key.validate()?;

    let repo = UserParkingRepository::new(state.pool.clone());
    if !repo.delete_by_pair(key).await? {
        return Err(ApiError::not_found("User parking relationship"));
    }

    info!(
        parking_id = key.parking_id,
        user_id = key.user_id,
        "User-parking grant deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
