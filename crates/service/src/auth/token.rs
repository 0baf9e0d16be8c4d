//! HS256 bearer tokens carrying the user id as `sub`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::AuthUser;
use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::Unauthorized)
    }
}

pub fn issue(user: &AuthUser, secret: &str, ttl: Duration) -> Result<String, AuthError> {
    issue_at(user, secret, Utc::now(), ttl)
}

pub fn issue_at(user: &AuthUser, secret: &str, now: DateTime<Utc>, ttl: Duration) -> Result<String, AuthError> {
    let exp = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AuthError::TokenError(format!("token ttl of {}s is out of range", ttl.num_seconds())))?;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Signature and expiry are both checked; any failure is `Unauthorized`.
pub fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AuthError::Unauthorized
        })
}
