//! App user entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::UserRole;
use sqlx::FromRow;

/// Database enum for user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRoleDb {
    ServiceAdmin,
    ParkingAdministrator,
}

impl From<UserRoleDb> for UserRole {
    fn from(db: UserRoleDb) -> Self {
        match db {
            UserRoleDb::ServiceAdmin => UserRole::ServiceAdmin,
            UserRoleDb::ParkingAdministrator => UserRole::ParkingAdministrator,
        }
    }
}

impl From<UserRole> for UserRoleDb {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::ServiceAdmin => UserRoleDb::ServiceAdmin,
            UserRole::ParkingAdministrator => UserRoleDb::ParkingAdministrator,
        }
    }
}

/// Outward columns of app_user. Deliberately has no hash column.
#[derive(Debug, Clone, FromRow)]
pub struct AppUserEntity {
    pub id: i64,
    pub username: String,
    pub role: UserRoleDb,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AppUserEntity> for domain::models::AppUser {
    fn from(entity: AppUserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            role: entity.role.into(),
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

/// Row used for login; includes the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct AppUserCredentialsEntity {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: UserRoleDb,
    pub is_active: bool,
}

impl From<AppUserCredentialsEntity> for domain::models::AppUserCredentials {
    fn from(entity: AppUserCredentialsEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            password_hash: entity.password_hash,
            role: entity.role.into(),
            is_active: entity.is_active,
        }
    }
}
