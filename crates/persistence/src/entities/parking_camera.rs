//! Parking-camera link entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the parking_camera table.
#[derive(Debug, Clone, FromRow)]
pub struct ParkingCameraEntity {
    pub id: i64,
    pub parking_id: i64,
    pub camera_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ParkingCameraEntity> for domain::models::ParkingCamera {
    fn from(entity: ParkingCameraEntity) -> Self {
        Self {
            id: entity.id,
            parking_id: entity.parking_id,
            camera_id: entity.camera_id,
            created_at: entity.created_at,
        }
    }
}
