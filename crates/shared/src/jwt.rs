//! Identity token utilities using HS256.
//!
//! Tokens carry the caller's user id, username and role. Signing and
//! verification share one process-wide secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum secret length accepted outside of tests.
pub const MIN_SECRET_LEN: usize = 32;

/// Error type for JWT operations.
///
/// Verification never reports why a token was rejected: malformed input, a bad
/// signature and an expired token all come back as `InvalidToken`.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// JWT token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// Role name as stored in `app_user.role`
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
}

impl Claims {
    /// Parses the numeric user id out of the subject claim.
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub.parse().map_err(|_| JwtError::InvalidToken)
    }
}

/// The identity a token is issued for.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: i64,
    pub username: &'a str,
    pub role: &'a str,
}

/// Configuration for token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token lifetime in seconds (default: 86400 = 24 hours)
    pub token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 86_400;

/// Upper bound on token lifetime: 10 years.
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 10 * 365 * 86_400;

impl JwtConfig {
    /// Creates a new JwtConfig from a shared secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC secret, at least [`MIN_SECRET_LEN`] bytes
    /// * `token_expiry_secs` - Token lifetime in seconds
    /// * `leeway_secs` - Leeway in seconds for clock skew tolerance
    pub fn new(secret: &str, token_expiry_secs: i64, leeway_secs: u64) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(JwtError::InvalidKey(format!(
                "secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        if token_expiry_secs <= 0 {
            return Err(JwtError::InvalidKey(
                "token expiry must be positive".to_string(),
            ));
        }
        if token_expiry_secs > MAX_TOKEN_EXPIRY_SECS {
            return Err(JwtError::InvalidKey(format!(
                "token expiry must be at most {} seconds",
                MAX_TOKEN_EXPIRY_SECS
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_secs,
            leeway_secs,
        })
    }

    /// Issues a signed token for the given subject.
    ///
    /// Returns the encoded token and its `jti`.
    pub fn issue_token(&self, subject: &TokenSubject<'_>) -> Result<(String, String), JwtError> {
        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();
        let exp = Duration::try_seconds(self.token_expiry_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| JwtError::EncodingError("token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: subject.user_id.to_string(),
            username: subject.username.to_string(),
            role: subject.role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: jti.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, jti))
    }

    /// Verifies signature and expiry, returning the claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| JwtError::InvalidToken)?;

        // A subject that is not a user id is as bad as a forged signature.
        claims.user_id()?;
        Ok(claims)
    }
}
