//! User-parking grant repository for database operations.
//!
//! This table is also the lookup behind lot-scoped authorization.

use async_trait::async_trait;
use domain::models::user_parking::{ListUserParkingsQuery, UserParkingKey};
use domain::services::LotLinks;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::UserParkingEntity;
use crate::metrics::QueryTimer;
use crate::query::Predicates;

const COLUMNS: &str = "id, user_id, parking_id, created_at";

/// Repository for user-parking grant database operations.
#[derive(Clone)]
pub struct UserParkingRepository {
    pool: PgPool,
}

impl UserParkingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        query: &ListUserParkingsQuery,
    ) -> Result<Vec<UserParkingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_user_parkings");
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM user_parking", COLUMNS));
        Predicates::new()
            .eq_opt("user_id", query.user_id)
            .eq_opt("parking_id", query.parking_id)
            .push_where(&mut qb);
        qb.push(" ORDER BY created_at DESC, id DESC");

        let result = qb
            .build_query_as::<UserParkingEntity>()
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserParkingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_parking_by_id");
        let result = sqlx::query_as::<_, UserParkingEntity>(&format!(
            "SELECT {} FROM user_parking WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, key: UserParkingKey) -> Result<UserParkingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user_parking");
        let result = sqlx::query_as::<_, UserParkingEntity>(&format!(
            r#"
            INSERT INTO user_parking (user_id, parking_id)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(key.user_id)
        .bind(key.parking_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_user_parking");
        let result = sqlx::query("DELETE FROM user_parking WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    pub async fn delete_by_pair(&self, key: UserParkingKey) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_user_parking_by_pair");
        let result = sqlx::query("DELETE FROM user_parking WHERE user_id = $1 AND parking_id = $2")
            .bind(key.user_id)
            .bind(key.parking_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    pub async fn exists(&self, user_id: i64, parking_id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("user_parking_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_parking WHERE user_id = $1 AND parking_id = $2)",
        )
        .bind(user_id)
        .bind(parking_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl LotLinks for UserParkingRepository {
    type Error = sqlx::Error;

    async fn is_linked(&self, user_id: i64, parking_id: i64) -> Result<bool, sqlx::Error> {
        self.exists(user_id, parking_id).await
    }
}
