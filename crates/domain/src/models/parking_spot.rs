//! Parking spot domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::patch::PartialUpdate;

/// A single spot inside a lot. `spot_number` is unique per lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: i64,
    pub parking_id: i64,
    pub spot_number: i32,
    pub is_free: bool,
    /// Opaque geometry blob, always a JSON object.
    pub coordinates: Value,
    /// Refreshed on every update.
    pub last_updated: DateTime<Utc>,
}

fn default_free() -> bool {
    true
}

/// Request payload for creating a parking spot.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParkingSpotRequest {
    #[validate(range(min = 1, message = "parking_id must be a positive id"))]
    pub parking_id: i64,

    #[validate(range(min = 1, message = "Spot number must be positive"))]
    pub spot_number: i32,

    #[serde(default = "default_free")]
    pub is_free: bool,

    #[validate(custom(function = "shared::validation::validate_coordinates"))]
    pub coordinates: Value,
}

/// Request payload for updating a parking spot (merge-patch).
///
/// The parent lot cannot be changed; a spot is recreated to move it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateParkingSpotRequest {
    #[validate(range(min = 1, message = "Spot number must be positive"))]
    pub spot_number: Option<i32>,

    pub is_free: Option<bool>,

    #[validate(custom(function = "shared::validation::validate_coordinates"))]
    pub coordinates: Option<Value>,
}

impl PartialUpdate for UpdateParkingSpotRequest {
    fn is_empty(&self) -> bool {
        self.spot_number.is_none() && self.is_free.is_none() && self.coordinates.is_none()
    }
}

/// Query parameters for listing parking spots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParkingSpotsQuery {
    #[serde(default, deserialize_with = "super::query::optional_id")]
    pub parking_id: Option<i64>,
}
