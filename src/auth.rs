use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, error::ApiError, routes::AppState};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub exp: u64,
    pub iat: u64,
    /// Owner id of every meal plan and recipe the bearer touches.
    pub sub: String,
}

/// Mints an HS256 token for `sub`, valid `expiration_days` unless `days` is given.
pub fn generate_token(
    config: &JwtConfig,
    sub: impl Into<String>,
    days: Option<i64>,
) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let days = days.unwrap_or(config.expiration_days).max(0) as u64;
    let claims = Claims {
        exp: now + days * 24 * 60 * 60,
        iat: now,
        sub: sub.into(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn validate_token(config: &JwtConfig, token: &str) -> anyhow::Result<Claims> {
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// The authenticated owner, read from `Authorization: Bearer <token>`.
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        let claims = validate_token(&state.config.jwt, token).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            expiration_days: 7,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = generate_token(&config(), "john", None).unwrap();
        let claims = validate_token(&config(), &token).unwrap();

        assert_eq!(claims.sub, "john");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_signed_with_another_secret_is_rejected() {
        let other = JwtConfig {
            secret: "another_secret_key_minimum_32_characters".to_string(),
            expiration_days: 7,
        };
        let token = generate_token(&other, "john", None).unwrap();

        assert!(validate_token(&config(), &token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            exp: 1_000_000,
            iat: 900_000,
            sub: "john".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config().secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&config(), &token).is_err());
    }
}
