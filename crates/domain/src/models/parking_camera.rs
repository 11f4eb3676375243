//! Camera-to-lot assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Link between a lot and a camera. Unique per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingCamera {
    pub id: i64,
    pub parking_id: i64,
    pub camera_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Natural key of a camera assignment; used for create and relation removal.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ParkingCameraKey {
    #[validate(range(min = 1, message = "parking_id must be a positive id"))]
    pub parking_id: i64,

    #[validate(range(min = 1, message = "camera_id must be a positive id"))]
    pub camera_id: i64,
}

/// Query parameters for listing assignments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParkingCamerasQuery {
    #[serde(default, deserialize_with = "super::query::optional_id")]
    pub parking_id: Option<i64>,
    #[serde(default, deserialize_with = "super::query::optional_id")]
    pub camera_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_requires_both_ids() {
        let result: Result<ParkingCameraKey, _> =
            serde_json::from_value(json!({"parking_id": 1}));
        assert!(result.is_err());

        let key: ParkingCameraKey =
            serde_json::from_value(json!({"parking_id": 1, "camera_id": 2})).unwrap();
        assert!(key.validate().is_ok());
    }

    #[test]
    fn test_key_rejects_non_positive_ids() {
        let key: ParkingCameraKey =
            serde_json::from_value(json!({"parking_id": 0, "camera_id": 2})).unwrap();
        assert!(key.validate().is_err());
    }
}
