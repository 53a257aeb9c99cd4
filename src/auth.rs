//! Bearer-token authentication.
//!
//! Callers present a JWT whose subject is their registered email; the
//! extractor verifies it and resolves the stored user record.

use crate::models::User;
use crate::state::AppState;
use crate::{Error, Result};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The authenticated caller, resolved from the `Authorization` header.
pub struct AuthedUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::Unauthorized("Authorization header is missing".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| Error::Unauthorized("Expected a bearer token".to_string()))?;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            Error::Unauthorized("Invalid bearer token".to_string())
        })?
        .claims;

        let user = state
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| Error::Unauthorized("Unknown user".to_string()))?;

        Ok(AuthedUser(user))
    }
}

/// Sign a token for this email, valid for `ttl_secs` seconds.
pub fn issue_token(email: &str, secret: &str, ttl_secs: u64) -> Result<String> {
    let exp = chrono::Utc::now().timestamp() as usize + ttl_secs as usize;
    let claims = Claims {
        sub: email.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Generic(format!("Failed to sign token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_decodes_with_same_secret() {
        let token = issue_token("a@b.c", "secret", 3600).unwrap();

        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.sub, "a@b.c");
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issue_token("a@b.c", "secret", 3600).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );

        assert!(result.is_err());
    }
}
