//! Session token issuance.
//!
//! Tokens are HS256 JWTs signed with the secret of the app they were issued
//! for, so a token minted for one app does not verify under another app's key.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::domain::{App, User};

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub app_id: i32,
    /// Issue instant, seconds since the epoch.
    pub iat: i64,
    /// Expiration instant, `iat + ttl`.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("app signing secret is empty")]
    EmptySecret,
    #[error("token ttl out of range")]
    InvalidTtl,
    #[error("signing failed: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Issue a token for `user` scoped to `app`, valid for `ttl` from now.
pub fn issue(user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
    issue_at(user, app, ttl, Utc::now())
}

/// Same as [`issue`] with an explicit issue instant.
pub fn issue_at(user: &User, app: &App, ttl: Duration, now: DateTime<Utc>) -> Result<String, TokenError> {
    let secret = app.secret.expose_secret();
    if secret.is_empty() {
        return Err(TokenError::EmptySecret);
    }
    let ttl = chrono::Duration::from_std(ttl).map_err(|_| TokenError::InvalidTtl)?;
    let exp = now.checked_add_signed(ttl).ok_or(TokenError::InvalidTtl)?;

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        app_id: app.id,
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))?;
    Ok(token)
}
