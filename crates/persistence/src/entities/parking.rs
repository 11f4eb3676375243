//! Parking lot entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the parking table.
#[derive(Debug, Clone, FromRow)]
pub struct ParkingEntity {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub total_spots: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ParkingEntity> for domain::models::Parking {
    fn from(entity: ParkingEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            address: entity.address,
            total_spots: entity.total_spots,
            latitude: entity.latitude,
            longitude: entity.longitude,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
