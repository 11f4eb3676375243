//! Parking spot entity (database row mapping).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database row mapping for the parking_spot table.
#[derive(Debug, Clone, FromRow)]
pub struct ParkingSpotEntity {
    pub id: i64,
    pub parking_id: i64,
    pub spot_number: i32,
    pub is_free: bool,
    pub coordinates: JsonValue,
    pub last_updated: DateTime<Utc>,
}

impl From<ParkingSpotEntity> for domain::models::ParkingSpot {
    fn from(entity: ParkingSpotEntity) -> Self {
        Self {
            id: entity.id,
            parking_id: entity.parking_id,
            spot_number: entity.spot_number,
            is_free: entity.is_free,
            coordinates: entity.coordinates,
            last_updated: entity.last_updated,
        }
    }
}
