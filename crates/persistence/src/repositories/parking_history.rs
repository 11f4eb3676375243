//! Parking history repository for database operations.

use domain::models::parking_history::{CreateParkingHistoryRequest, RecordedRange};
use domain::services::Visibility;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::ParkingHistoryEntity;
use crate::metrics::QueryTimer;
use crate::query::Predicates;

const COLUMNS: &str = "id, parking_id, spots_state, recorded_at";

/// Filters for listing history snapshots.
#[derive(Debug, Clone, Copy)]
pub struct ParkingHistoryFilter {
    pub parking_id: Option<i64>,
    pub recorded: RecordedRange,
    pub visibility: Visibility,
}

/// Repository for parking history database operations.
///
/// Snapshots are append-only; there is no update.
#[derive(Clone)]
pub struct ParkingHistoryRepository {
    pool: PgPool,
}

impl ParkingHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists snapshots, most recent first.
    pub async fn find_all(
        &self,
        filter: ParkingHistoryFilter,
    ) -> Result<Vec<ParkingHistoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_parking_history");
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM parking_history", COLUMNS));
        Predicates::new()
            .eq_opt("parking_id", filter.parking_id)
            .gte_opt("recorded_at", filter.recorded.from)
            .lte_opt("recorded_at", filter.recorded.to)
            .visible_to("parking_id", filter.visibility)
            .push_where(&mut qb);
        qb.push(" ORDER BY recorded_at DESC, id DESC");

        let result = qb
            .build_query_as::<ParkingHistoryEntity>()
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ParkingHistoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_parking_history_by_id");
        let result = sqlx::query_as::<_, ParkingHistoryEntity>(&format!(
            "SELECT {} FROM parking_history WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lot that owns the snapshot, used for access checks before deletion.
    pub async fn parking_id_of(&self, id: i64) -> Result<Option<i64>, sqlx::Error> {
        let timer = QueryTimer::new("find_parking_history_parking_id");
        let result =
            sqlx::query_scalar::<_, i64>("SELECT parking_id FROM parking_history WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        input: &CreateParkingHistoryRequest,
    ) -> Result<ParkingHistoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_parking_history");
        let result = sqlx::query_as::<_, ParkingHistoryEntity>(&format!(
            r#"
            INSERT INTO parking_history (parking_id, spots_state)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(input.parking_id)
        .bind(&input.spots_state)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_parking_history");
        let result = sqlx::query("DELETE FROM parking_history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
