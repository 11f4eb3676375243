//! App user repository for database operations.
//!
//! Only [`AppUserRepository::find_by_username`] reads the password hash; every
//! other query selects the outward columns.

use domain::models::{AppUserChanges, UserRole};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::{AppUserCredentialsEntity, AppUserEntity, UserRoleDb};
use crate::metrics::QueryTimer;
use crate::query::Assignments;

const COLUMNS: &str = "id, username, role, is_active, created_at";

/// Repository for app user database operations.
#[derive(Clone)]
pub struct AppUserRepository {
    pool: PgPool,
}

impl AppUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<AppUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_app_users");
        let result = sqlx::query_as::<_, AppUserEntity>(&format!(
            "SELECT {} FROM app_user ORDER BY created_at DESC, id DESC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<AppUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_app_user_by_id");
        let result = sqlx::query_as::<_, AppUserEntity>(&format!(
            "SELECT {} FROM app_user WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Exact-match lookup for login, including the stored hash.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AppUserCredentialsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_app_user_by_username");
        let result = sqlx::query_as::<_, AppUserCredentialsEntity>(
            r#"
            SELECT id, username, password_hash, role, is_active
            FROM app_user
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Inserts a user. `password_hash` must already be hashed.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        is_active: bool,
    ) -> Result<AppUserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_app_user");
        let result = sqlx::query_as::<_, AppUserEntity>(&format!(
            r#"
            INSERT INTO app_user (username, password_hash, role, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(username)
        .bind(password_hash)
        .bind(UserRoleDb::from(role))
        .bind(is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        changes: AppUserChanges,
    ) -> Result<Option<AppUserEntity>, sqlx::Error> {
        let assignments = Assignments::new()
            .set_some("username", changes.username)
            .set_some("password_hash", changes.password_hash)
            .set_some("role", changes.role.map(UserRoleDb::from))
            .set_some("is_active", changes.is_active);

        if assignments.is_empty() {
            return self.find_by_id(id).await;
        }

        let timer = QueryTimer::new("update_app_user");
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE app_user SET ");
        assignments.push_to(&mut qb);
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {}", COLUMNS));

        let result = qb
            .build_query_as::<AppUserEntity>()
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_app_user");
        let result = sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    pub async fn service_admin_exists(&self) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("service_admin_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM app_user WHERE role = 'service_admin')",
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Creates the first service admin inside a transaction.
    ///
    /// Returns `None` when a service admin already exists or the username is
    /// taken, so concurrent starts cannot create two.
    pub async fn create_initial_service_admin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<AppUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_initial_service_admin");
        let mut tx = self.pool.begin().await?;

        // Serializes bootstrap across instances sharing the database.
        sqlx::query("LOCK TABLE app_user IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let created = sqlx::query_as::<_, AppUserEntity>(&format!(
            r#"
            INSERT INTO app_user (username, password_hash, role, is_active)
            SELECT $1, $2, 'service_admin'::user_role, true
            WHERE NOT EXISTS (SELECT 1 FROM app_user WHERE role = 'service_admin')
            ON CONFLICT (username) DO NOTHING
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(created)
    }
}
