//! User-parking grant entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the user_parking table.
#[derive(Debug, Clone, FromRow)]
pub struct UserParkingEntity {
    pub id: i64,
    pub user_id: i64,
    pub parking_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<UserParkingEntity> for domain::models::UserParking {
    fn from(entity: UserParkingEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            parking_id: entity.parking_id,
            created_at: entity.created_at,
        }
    }
}
