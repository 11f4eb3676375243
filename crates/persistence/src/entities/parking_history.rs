//! Parking history entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the parking_history table.
#[derive(Debug, Clone, FromRow)]
pub struct ParkingHistoryEntity {
    pub id: i64,
    pub parking_id: i64,
    pub spots_state: Vec<i32>,
    pub recorded_at: DateTime<Utc>,
}

impl From<ParkingHistoryEntity> for domain::models::ParkingHistory {
    fn from(entity: ParkingHistoryEntity) -> Self {
        Self {
            id: entity.id,
            parking_id: entity.parking_id,
            spots_state: entity.spots_state,
            recorded_at: entity.recorded_at,
        }
    }
}
