//! Caller identity from the `Authorization: Bearer` header.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use domain::models::UserRole;
use domain::services::Identity;
use shared::jwt::{JwtConfig, JwtError};

use crate::app::AppState;
use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Decodes a verified token into the caller it names.
///
/// A role the service does not know is treated like any other bad token.
pub fn identity_from_token(jwt: &JwtConfig, token: &str) -> Result<Identity, JwtError> {
    let claims = jwt.verify_token(token)?;
    let user_id = claims.user_id()?;
    let role: UserRole = claims.role.parse().map_err(|_| JwtError::InvalidToken)?;

    Ok(Identity {
        user_id,
        username: claims.username,
        role,
    })
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Required authentication. Rejects with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("Authorization token required".to_string()))?;

        let identity = identity_from_token(&state.jwt, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(Caller(identity))
    }
}

/// Optional authentication for open reads.
///
/// A missing, malformed or expired token leaves the caller anonymous rather
/// than failing the request.
#[derive(Debug, Clone)]
pub struct MaybeCaller(pub Option<Identity>);

impl MaybeCaller {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = bearer_token(parts).and_then(|token| {
            match identity_from_token(&state.jwt, token) {
                Ok(identity) => Some(identity),
                Err(_) => {
                    tracing::debug!("Ignoring invalid token on optional-auth route");
                    None
                }
            }
        });

        Ok(MaybeCaller(identity))
    }
}
