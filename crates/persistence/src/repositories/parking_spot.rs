//! Parking spot repository for database operations.

use domain::models::parking_spot::{CreateParkingSpotRequest, UpdateParkingSpotRequest};
use domain::services::Visibility;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::ParkingSpotEntity;
use crate::metrics::QueryTimer;
use crate::query::{Assignments, Predicates};

const COLUMNS: &str = "id, parking_id, spot_number, is_free, coordinates, last_updated";

/// Filters for listing spots.
#[derive(Debug, Clone, Copy)]
pub struct ParkingSpotFilter {
    pub parking_id: Option<i64>,
    pub visibility: Visibility,
}

/// Repository for parking spot database operations.
#[derive(Clone)]
pub struct ParkingSpotRepository {
    pool: PgPool,
}

impl ParkingSpotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists spots ordered by spot number.
    pub async fn find_all(
        &self,
        filter: ParkingSpotFilter,
    ) -> Result<Vec<ParkingSpotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_parking_spots");
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM parking_spot", COLUMNS));
        Predicates::new()
            .eq_opt("parking_id", filter.parking_id)
            .visible_to("parking_id", filter.visibility)
            .push_where(&mut qb);
        qb.push(" ORDER BY spot_number ASC, parking_id ASC");

        let result = qb
            .build_query_as::<ParkingSpotEntity>()
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ParkingSpotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_parking_spot_by_id");
        let result = sqlx::query_as::<_, ParkingSpotEntity>(&format!(
            "SELECT {} FROM parking_spot WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lot that owns the spot, used for access checks before mutation.
    pub async fn parking_id_of(&self, id: i64) -> Result<Option<i64>, sqlx::Error> {
        let timer = QueryTimer::new("find_parking_spot_parking_id");
        let result = sqlx::query_scalar::<_, i64>("SELECT parking_id FROM parking_spot WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        input: &CreateParkingSpotRequest,
    ) -> Result<ParkingSpotEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_parking_spot");
        let result = sqlx::query_as::<_, ParkingSpotEntity>(&format!(
            r#"
            INSERT INTO parking_spot (parking_id, spot_number, is_free, coordinates)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(input.parking_id)
        .bind(input.spot_number)
        .bind(input.is_free)
        .bind(&input.coordinates)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Applies a merge-patch and refreshes `last_updated`.
    pub async fn update(
        &self,
        id: i64,
        changes: UpdateParkingSpotRequest,
    ) -> Result<Option<ParkingSpotEntity>, sqlx::Error> {
        let assignments = Assignments::new()
            .set_some("spot_number", changes.spot_number)
            .set_some("is_free", changes.is_free)
            .set_some("coordinates", changes.coordinates);

        if assignments.is_empty() {
            return self.find_by_id(id).await;
        }

        let timer = QueryTimer::new("update_parking_spot");
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE parking_spot SET ");
        assignments.touch("last_updated").push_to(&mut qb);
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {}", COLUMNS));

        let result = qb
            .build_query_as::<ParkingSpotEntity>()
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_parking_spot");
        let result = sqlx::query("DELETE FROM parking_spot WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
