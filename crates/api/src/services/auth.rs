//! Login and current-user lookup.

use domain::models::{AppUser, AppUserCredentials, LoginResponse, LoginUser};
use persistence::repositories::AppUserRepository;
use shared::jwt::{JwtConfig, JwtError, TokenSubject};
use shared::password::{hash_password, verify_password, PasswordError};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::ApiError;

/// The same message for an unknown user and a wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User account is disabled")]
    AccountDisabled,

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()),
            AuthError::AccountDisabled => {
                ApiError::Forbidden("User account is disabled".to_string())
            }
            AuthError::UserNotFound => ApiError::not_found("User"),
            AuthError::DatabaseError(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Hashes off the async executor; Argon2 takes tens of milliseconds.
pub async fn hash_in_background(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(AuthError::from)
}

async fn verify_in_background(password: String, stored_hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(AuthError::from)
}

pub struct AuthService {
    users: AppUserRepository,
    jwt: Arc<JwtConfig>,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: Arc<JwtConfig>) -> Self {
        Self {
            users: AppUserRepository::new(pool),
            jwt,
        }
    }

    /// Checks the password and issues a token.
    ///
    /// An unknown username still costs one hash so both failure paths take
    /// about as long. A disabled account is only reported once the password
    /// has been proven.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let credentials: AppUserCredentials = match self.users.find_by_username(username).await? {
            Some(entity) => entity.into(),
            None => {
                hash_in_background(password.to_string()).await?;
                return Err(AuthError::InvalidCredentials);
            }
        };

        let valid = verify_in_background(password.to_string(), credentials.password_hash).await?;
        if !valid {
            warn!(user_id = credentials.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !credentials.is_active {
            warn!(user_id = credentials.id, "Login refused: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        let (token, _jti) = self.jwt.issue_token(&TokenSubject {
            user_id: credentials.id,
            username: &credentials.username,
            role: credentials.role.as_str(),
        })?;

        info!(user_id = credentials.id, role = %credentials.role, "User logged in");

        Ok(LoginResponse {
            token,
            user: LoginUser {
                id: credentials.id,
                username: credentials.username,
                role: credentials.role,
            },
        })
    }

    /// Re-reads the caller; the account may have been removed since the
    /// token was issued.
    pub async fn current_user(&self, user_id: i64) -> Result<AppUser, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(AppUser::from)
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let response = ApiError::from(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_disabled_account_maps_to_403() {
        let response = ApiError::from(AuthError::AccountDisabled).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_user_maps_to_404() {
        let error = ApiError::from(AuthError::UserNotFound);
        assert!(matches!(error, ApiError::NotFound(msg) if msg == "User not found"));
    }

    #[test]
    fn test_token_error_is_internal() {
        let error = ApiError::from(AuthError::TokenError(JwtError::EncodingError("x".into())));
        assert!(matches!(error, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_background_hash_verifies() {
        let hash = hash_in_background("lot-7-admin".to_string()).await.unwrap();
        assert!(verify_in_background("lot-7-admin".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_in_background("lot-8-admin".to_string(), hash)
            .await
            .unwrap());
    }
}
