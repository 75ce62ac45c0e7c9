//! JWT 签发与校验
//!
//! The mock issues real HS256 tokens so the client exercises the same
//! bearer-header path it would against a production backend.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Token 有效期（秒）
pub const TOKEN_TTL_SECS: i64 = 8 * 3600;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub username: String,
    pub exp: usize,
}

/// 签发 token
pub fn issue_token(secret: &str, user_id: i64, username: &str) -> Result<String, ApiError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::seconds(TOKEN_TTL_SECS))
        .ok_or_else(|| ApiError::Internal("token expiry overflow".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token encode failed: {e}")))
}

/// 校验 token，返回声明
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::unauthorized("Unauthorized"))
}

/// 已认证用户提取器
///
/// Pulls the bearer token off the Authorization header and verifies it.
/// Handlers that take this argument are protected endpoints.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        let claims = verify_token(&state.jwt_secret, token)?;
        Ok(CurrentUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let token = issue_token("test-secret", 1, "admin").unwrap();
        let claims = verify_token("test-secret", &token).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.username, "admin");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token("secret-a", 1, "admin").unwrap();
        assert!(verify_token("secret-b", &token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("test-secret", "mock-jwt-token-1").is_err());
    }
}
