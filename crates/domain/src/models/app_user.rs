//! Application user (administrator account) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::patch::PartialUpdate;

/// Closed set of stored roles. Anonymous callers ("drivers") have no role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    ServiceAdmin,
    ParkingAdministrator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::ServiceAdmin => "service_admin",
            UserRole::ParkingAdministrator => "parking_administrator",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "service_admin" => Ok(UserRole::ServiceAdmin),
            "parking_administrator" => Ok(UserRole::ParkingAdministrator),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outward-facing user shape. The password hash never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Stored credentials, used only by login.
#[derive(Debug, Clone)]
pub struct AppUserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Request payload for creating a user. The password is hashed before storage.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAppUserRequest {
    #[validate(
        length(min = 1, max = 100, message = "Username must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub username: String,

    #[validate(length(min = 1, max = 256, message = "Password must be 1-256 characters"))]
    pub password: String,

    pub role: UserRole,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request payload for updating a user (merge-patch).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAppUserRequest {
    #[validate(
        length(min = 1, max = 100, message = "Username must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 256, message = "Password must be 1-256 characters"))]
    pub password: Option<String>,

    pub role: Option<UserRole>,

    pub is_active: Option<bool>,
}

impl PartialUpdate for UpdateAppUserRequest {
    fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}

impl UpdateAppUserRequest {
    /// Splits off the plaintext password so the caller can hash it, and
    /// returns the remaining changes.
    pub fn into_parts(self) -> (Option<String>, AppUserChanges) {
        (
            self.password,
            AppUserChanges {
                username: self.username,
                password_hash: None,
                role: self.role,
                is_active: self.is_active,
            },
        )
    }
}

/// Storage-ready user changes. `password_hash` is already hashed.
#[derive(Debug, Clone, Default)]
pub struct AppUserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Request payload for login.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User summary embedded in the login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

/// Response payload for login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&UserRole::ServiceAdmin).unwrap(),
            "\"service_admin\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::ParkingAdministrator).unwrap(),
            "\"parking_administrator\""
        );
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("service_admin".parse::<UserRole>(), Ok(UserRole::ServiceAdmin));
        assert_eq!(
            "parking_administrator".parse::<UserRole>(),
            Ok(UserRole::ParkingAdministrator)
        );
        assert!("driver".parse::<UserRole>().is_err());
        assert!("SERVICE_ADMIN".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_create_rejects_unknown_role() {
        let result: Result<CreateAppUserRequest, _> = serde_json::from_value(
            json!({"username": "bob", "password": "pw", "role": "driver"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_defaults_to_active() {
        let req: CreateAppUserRequest = serde_json::from_value(
            json!({"username": "bob", "password": "pw", "role": "parking_administrator"}),
        )
        .unwrap();
        assert!(req.is_active);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_user_serialization_has_no_hash() {
        let user = AppUser {
            id: 1,
            username: "bob".to_string(),
            role: UserRole::ServiceAdmin,
            is_active: true,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "service_admin");
    }

    #[test]
    fn test_update_into_parts_separates_password() {
        let req: UpdateAppUserRequest =
            serde_json::from_value(json!({"password": "new-pass", "is_active": false})).unwrap();
        assert!(!req.is_empty());

        let (password, changes) = req.into_parts();
        assert_eq!(password.as_deref(), Some("new-pass"));
        assert!(changes.password_hash.is_none());
        assert_eq!(changes.is_active, Some(false));
        assert!(changes.username.is_none());
    }

    #[test]
    fn test_update_password_hash_key_is_ignored() {
        let req: UpdateAppUserRequest =
            serde_json::from_value(json!({"password_hash": "$argon2id$forged"})).unwrap();
        assert!(req.is_empty());
    }
}
