//! Camera domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::patch::PartialUpdate;

/// A camera feeding a stream that observes one or more lots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: i64,
    pub name: String,
    /// Stream-source locator.
    pub rtsp_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Request payload for registering a camera.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCameraRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(
        length(min = 1, max = 2048, message = "Stream URL must be 1-2048 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub rtsp_url: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request payload for updating a camera (merge-patch).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCameraRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 2048, message = "Stream URL must be 1-2048 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub rtsp_url: Option<String>,

    pub is_active: Option<bool>,
}

impl PartialUpdate for UpdateCameraRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.rtsp_url.is_none() && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults_to_active() {
        let req: CreateCameraRequest = serde_json::from_value(
            json!({"name": "Gate A", "rtsp_url": "rtsp://10.0.0.5/stream1"}),
        )
        .unwrap();
        assert!(req.is_active);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_empty_url() {
        let req: CreateCameraRequest =
            serde_json::from_value(json!({"name": "Gate A", "rtsp_url": ""})).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rtsp_url"));
    }

    #[test]
    fn test_update_is_empty() {
        let req: UpdateCameraRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.is_empty());

        let req: UpdateCameraRequest =
            serde_json::from_value(json!({"is_active": false})).unwrap();
        assert!(!req.is_empty());
    }
}
