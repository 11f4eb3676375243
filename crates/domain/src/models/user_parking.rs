//! User-to-lot grants. These rows are what scopes a parking administrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Grants a user management rights over a lot. Unique per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserParking {
    pub id: i64,
    pub user_id: i64,
    pub parking_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Natural key of a grant; used for create and relation removal.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct UserParkingKey {
    #[validate(range(min = 1, message = "user_id must be a positive id"))]
    pub user_id: i64,

    #[validate(range(min = 1, message = "parking_id must be a positive id"))]
    pub parking_id: i64,
}

/// Query parameters for listing grants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUserParkingsQuery {
    #[serde(default, deserialize_with = "super::query::optional_id")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "super::query::optional_id")]
    pub parking_id: Option<i64>,
}
