//! Camera entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the camera table.
#[derive(Debug, Clone, FromRow)]
pub struct CameraEntity {
    pub id: i64,
    pub name: String,
    pub rtsp_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CameraEntity> for domain::models::Camera {
    fn from(entity: CameraEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            rtsp_url: entity.rtsp_url,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
