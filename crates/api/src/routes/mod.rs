//! HTTP route handlers.

pub mod auth;
pub mod cameras;
pub mod health;
pub mod parking_cameras;
pub mod parking_history;
pub mod parking_spots;
pub mod parkings;
pub mod user_parkings;
pub mod users;

use domain::models::PartialUpdate;
use domain::services::{authorize_lot, Identity};

use crate::app::AppState;
use crate::error::{ensure, ApiError, LOT_ACCESS_DENIED, NO_FIELDS_TO_UPDATE};

/// Writes that touch one lot: service admins always, parking administrators
/// only with a grant for `parking_id`.
pub(crate) async fn ensure_lot_access(
    state: &AppState,
    caller: &Identity,
    parking_id: i64,
) -> Result<(), ApiError> {
    let access = authorize_lot(Some(caller), parking_id, &state.lot_links()).await?;
    ensure(access, LOT_ACCESS_DENIED)
}

/// Rejects an update that names no field, before anything is read or written.
pub(crate) fn reject_empty<T: PartialUpdate>(changes: &T) -> Result<(), ApiError> {
    if changes.is_empty() {
        return Err(ApiError::Validation(NO_FIELDS_TO_UPDATE.to_string()));
    }
    Ok(())
}
