//! Camera repository for database operations.

use domain::models::camera::{CreateCameraRequest, UpdateCameraRequest};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::CameraEntity;
use crate::metrics::QueryTimer;
use crate::query::Assignments;

const COLUMNS: &str = "id, name, rtsp_url, is_active, created_at";

/// Repository for camera database operations.
#[derive(Clone)]
pub struct CameraRepository {
    pool: PgPool,
}

impl CameraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<CameraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_cameras");
        let result = sqlx::query_as::<_, CameraEntity>(&format!(
            "SELECT {} FROM camera ORDER BY created_at DESC, id DESC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<CameraEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_camera_by_id");
        let result = sqlx::query_as::<_, CameraEntity>(&format!(
            "SELECT {} FROM camera WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, input: &CreateCameraRequest) -> Result<CameraEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_camera");
        let result = sqlx::query_as::<_, CameraEntity>(&format!(
            r#"
            INSERT INTO camera (name, rtsp_url, is_active)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.rtsp_url)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        changes: UpdateCameraRequest,
    ) -> Result<Option<CameraEntity>, sqlx::Error> {
        let assignments = Assignments::new()
            .set_some("name", changes.name)
            .set_some("rtsp_url", changes.rtsp_url)
            .set_some("is_active", changes.is_active);

        if assignments.is_empty() {
            return self.find_by_id(id).await;
        }

        let timer = QueryTimer::new("update_camera");
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE camera SET ");
        assignments.push_to(&mut qb);
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {}", COLUMNS));

        let result = qb
            .build_query_as::<CameraEntity>()
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_camera");
        let result = sqlx::query("DELETE FROM camera WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
