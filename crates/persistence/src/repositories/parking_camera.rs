//! Parking-camera link repository for database operations.

use domain::models::parking_camera::{ListParkingCamerasQuery, ParkingCameraKey};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::ParkingCameraEntity;
use crate::metrics::QueryTimer;
use crate::query::Predicates;

const COLUMNS: &str = "id, parking_id, camera_id, created_at";

/// Repository for parking-camera link database operations.
#[derive(Clone)]
pub struct ParkingCameraRepository {
    pool: PgPool,
}

impl ParkingCameraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        query: &ListParkingCamerasQuery,
    ) -> Result<Vec<ParkingCameraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_parking_cameras");
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM parking_camera", COLUMNS));
        Predicates::new()
            .eq_opt("parking_id", query.parking_id)
            .eq_opt("camera_id", query.camera_id)
            .push_where(&mut qb);
        qb.push(" ORDER BY created_at DESC, id DESC");

        let result = qb
            .build_query_as::<ParkingCameraEntity>()
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ParkingCameraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_parking_camera_by_id");
        let result = sqlx::query_as::<_, ParkingCameraEntity>(&format!(
            "SELECT {} FROM parking_camera WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, key: ParkingCameraKey) -> Result<ParkingCameraEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_parking_camera");
        let result = sqlx::query_as::<_, ParkingCameraEntity>(&format!(
            r#"
            INSERT INTO parking_camera (parking_id, camera_id)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(key.parking_id)
        .bind(key.camera_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_parking_camera");
        let result = sqlx::query("DELETE FROM parking_camera WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    pub async fn delete_by_pair(&self, key: ParkingCameraKey) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_parking_camera_by_pair");
        let result = sqlx::query("DELETE FROM parking_camera WHERE parking_id = $1 AND camera_id = $2")
            .bind(key.parking_id)
            .bind(key.camera_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
