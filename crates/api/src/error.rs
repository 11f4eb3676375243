//! Error envelope shared by every endpoint.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::{Access, Denial};
use serde::Serialize;
use thiserror::Error;

pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";
pub const LOT_ACCESS_DENIED: &str =
    "Access denied. You do not have permission to access this parking";
pub const NO_FIELDS_TO_UPDATE: &str = "No fields to update";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {message}")]
    InvalidFields {
        message: String,
        details: Vec<ValidationDetail>,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request timed out")]
    Timeout,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::InvalidFields { message, details } => {
                (StatusCode::BAD_REQUEST, message, Some(details))
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request timed out".to_string(),
                None,
            ),
        };

        let body = ErrorBody {
            status: "error",
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl ApiError {
    /// Maps storage errors with resource-specific messages for unique and
    /// foreign-key violations.
    pub fn from_db(err: sqlx::Error, conflict_msg: &str, missing_msg: &str) -> Self {
        match sqlstate(&err).as_deref() {
            Some("23505") => ApiError::Conflict(conflict_msg.to_string()),
            Some("23503") => ApiError::NotFound(missing_msg.to_string()),
            _ => err.into(),
        }
    }

    /// Converts a policy refusal. `role_msg` explains which role was needed.
    pub fn from_denial(denial: Denial, role_msg: &str) -> Self {
        match denial {
            Denial::Unauthenticated => ApiError::Unauthorized(AUTHENTICATION_REQUIRED.to_string()),
            Denial::InsufficientRole => ApiError::Forbidden(role_msg.to_string()),
            Denial::NotLinked => ApiError::Forbidden(LOT_ACCESS_DENIED.to_string()),
        }
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }
}

/// Turns a policy decision into `Ok(())` or the matching error.
pub fn ensure(access: Access, role_msg: &str) -> Result<(), ApiError> {
    access
        .into_result()
        .map_err(|denial| ApiError::from_denial(denial, role_msg))
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|code| code.into_owned()),
        _ => None,
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return ApiError::NotFound("Resource not found".into());
        }
        match sqlstate(&err).as_deref() {
            Some("23505") => ApiError::Conflict("Resource already exists".into()),
            Some("23503") => ApiError::NotFound("Referenced resource not found".into()),
            Some("23514") => ApiError::Validation("Value violates a data constraint".into()),
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: field.to_string(),
                    message: e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field)),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        let message = if details.len() == 1 {
            details[0].message.clone()
        } else {
            format!("{} validation errors", details.len())
        };

        ApiError::InvalidFields { message, details }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
