//! Parking lot domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::patch::{PartialUpdate, Patch};

/// A physical parking facility ("lot").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parking {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub total_spots: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Request payload for creating a parking lot.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParkingRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(
        length(min = 1, max = 500, message = "Address must be 1-500 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub address: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Total spots must be non-negative"))]
    pub total_spots: i32,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: Option<f64>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request payload for updating a parking lot (merge-patch).
///
/// `latitude`/`longitude` accept `null` to clear the stored coordinate.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_patch_coordinates"))]
pub struct UpdateParkingRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 500, message = "Address must be 1-500 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub address: Option<String>,

    #[validate(range(min = 0, message = "Total spots must be non-negative"))]
    pub total_spots: Option<i32>,

    #[serde(default)]
    pub latitude: Patch<f64>,

    #[serde(default)]
    pub longitude: Patch<f64>,

    pub is_active: Option<bool>,
}

fn validate_patch_coordinates(req: &UpdateParkingRequest) -> Result<(), ValidationError> {
    if let Some(lat) = req.latitude.as_set() {
        shared::validation::validate_latitude(*lat)?;
    }
    if let Some(lon) = req.longitude.as_set() {
        shared::validation::validate_longitude(*lon)?;
    }
    Ok(())
}

impl PartialUpdate for UpdateParkingRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.total_spots.is_none()
            && self.latitude.is_absent()
            && self.longitude.is_absent()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults() {
        let req: CreateParkingRequest =
            serde_json::from_value(json!({"name": "Central", "address": "1 Main St"})).unwrap();
        assert_eq!(req.total_spots, 0);
        assert!(req.is_active);
        assert!(req.latitude.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_requires_name_and_address() {
        let result: Result<CreateParkingRequest, _> =
            serde_json::from_value(json!({"name": "Central"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let req: CreateParkingRequest =
            serde_json::from_value(json!({"name": "  ", "address": "1 Main St"})).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_rejects_out_of_range_latitude() {
        let req: CreateParkingRequest = serde_json::from_value(
            json!({"name": "Central", "address": "1 Main St", "latitude": 91.0}),
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_empty_payload() {
        let req: UpdateParkingRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.is_empty());
    }

    #[test]
    fn test_update_unknown_keys_only_is_empty() {
        let req: UpdateParkingRequest =
            serde_json::from_value(json!({"colour": "blue"})).unwrap();
        assert!(req.is_empty());
    }

    #[test]
    fn test_update_explicit_false_is_not_empty() {
        let req: UpdateParkingRequest =
            serde_json::from_value(json!({"is_active": false})).unwrap();
        assert!(!req.is_empty());
        assert_eq!(req.is_active, Some(false));
    }

    #[test]
    fn test_update_null_latitude_clears() {
        let req: UpdateParkingRequest =
            serde_json::from_value(json!({"latitude": null})).unwrap();
        assert!(!req.is_empty());
        assert_eq!(req.latitude, Patch::Null);
        assert!(req.longitude.is_absent());
    }

    #[test]
    fn test_update_validates_set_coordinates() {
        let req: UpdateParkingRequest =
            serde_json::from_value(json!({"longitude": 200.0})).unwrap();
        assert!(req.validate().is_err());

        let req: UpdateParkingRequest =
            serde_json::from_value(json!({"latitude": 48.1, "longitude": 17.1})).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_negative_total_spots() {
        let req: UpdateParkingRequest =
            serde_json::from_value(json!({"total_spots": -1})).unwrap();
        assert!(req.validate().is_err());
    }
}
