//! Access Token
//!
//! Claim set and issuing logic for the per-app access token. Each token is
//! signed with the secret of the app it was issued for, so a token is only
//! verifiable by that tenant.

use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::token::{self, TokenError};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{app::App, user::User};

/// Claims embedded in every access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub uid: i64,
    /// Login email as stored
    pub email: String,
    /// Issuing app id
    pub app_id: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    fn build(user: &User, app: &App, ttl: Duration, now: DateTime<Utc>) -> Self {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            uid: user.id.get(),
            email: user.email.as_str().to_owned(),
            app_id: app.id.get(),
            exp: now.timestamp().saturating_add(ttl_secs),
        }
    }
}

/// Issue a token for `user` signed with `app`'s secret, valid for `ttl`
pub fn issue_token(user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
    issue_token_at(user, app, ttl, Utc::now())
}

/// Issue a token with an explicit issuing instant
pub fn issue_token_at(
    user: &User,
    app: &App,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = TokenClaims::build(user, app, ttl, now);
    token::sign(&claims, app.secret.as_bytes())
}

/// Verify a token against `app`'s secret
///
/// Fails if the signature does not match, the token has expired, or the
/// `app_id` claim names a different app.
pub fn verify_token(token: &str, app: &App) -> Result<TokenClaims, TokenError> {
    let claims: TokenClaims = token::verify(token, app.secret.as_bytes())?;
    if claims.app_id != app.id.get() {
        return Err(TokenError::ClaimMismatch("app_id"));
    }
    Ok(claims)
}
