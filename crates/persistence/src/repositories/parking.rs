//! Parking lot repository for database operations.

use domain::models::parking::{CreateParkingRequest, UpdateParkingRequest};
use domain::services::Visibility;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::ParkingEntity;
use crate::metrics::QueryTimer;
use crate::query::{Assignments, Predicates};

const COLUMNS: &str = "id, name, address, total_spots, latitude, longitude, is_active, created_at";

/// Repository for parking lot database operations.
#[derive(Clone)]
pub struct ParkingRepository {
    pool: PgPool,
}

impl ParkingRepository {
    /// Creates a new ParkingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists lots, newest first, narrowed to the caller's grants when scoped.
    pub async fn find_all(&self, visibility: Visibility) -> Result<Vec<ParkingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_parkings");
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM parking", COLUMNS));
        Predicates::new()
            .visible_to("id", visibility)
            .push_where(&mut qb);
        qb.push(" ORDER BY created_at DESC, id DESC");

        let result = qb
            .build_query_as::<ParkingEntity>()
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ParkingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_parking_by_id");
        let result = sqlx::query_as::<_, ParkingEntity>(&format!(
            "SELECT {} FROM parking WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, input: &CreateParkingRequest) -> Result<ParkingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_parking");
        let result = sqlx::query_as::<_, ParkingEntity>(&format!(
            r#"
            INSERT INTO parking (name, address, total_spots, latitude, longitude, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.total_spots)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Applies a merge-patch. Returns `None` if the lot does not exist.
    pub async fn update(
        &self,
        id: i64,
        changes: UpdateParkingRequest,
    ) -> Result<Option<ParkingEntity>, sqlx::Error> {
        let assignments = Assignments::new()
            .set_some("name", changes.name)
            .set_some("address", changes.address)
            .set_some("total_spots", changes.total_spots)
            .set_patch("latitude", changes.latitude)
            .set_patch("longitude", changes.longitude)
            .set_some("is_active", changes.is_active);

        if assignments.is_empty() {
            return self.find_by_id(id).await;
        }

        let timer = QueryTimer::new("update_parking");
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE parking SET ");
        assignments.push_to(&mut qb);
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {}", COLUMNS));

        let result = qb
            .build_query_as::<ParkingEntity>()
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Deletes a lot together with its spots, history and links.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_parking");
        let result = sqlx::query("DELETE FROM parking WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
