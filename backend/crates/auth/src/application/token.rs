//! Token Minting
//!
//! Tokens are compact HS256 JWTs signed with the target app's secret. The
//! payload is exactly [`TokenClaims`]; `exp` is seconds since the epoch.

use std::time::Duration;

use chrono::Utc;
use platform::jwt::{self, JwtError};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{app::App, user::User};
use crate::domain::value_object::app_secret::AppSecret;

/// Claims carried by every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub uid: i64,
    pub email: String,
    pub app_id: i64,
    pub exp: i64,
}

/// Sign a token for `user` under `app`'s secret, valid for `ttl`
pub fn mint_token(user: &User, app: &App, ttl: Duration) -> Result<String, JwtError> {
    let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    let claims = TokenClaims {
        uid: user.id.get(),
        email: user.email.as_str().to_string(),
        app_id: app.id.get(),
        exp: Utc::now().timestamp().saturating_add(ttl_secs),
    };

    jwt::sign_hs256(&claims, app.secret.as_bytes())
}

/// Check signature and expiry, then decode the claims
pub fn verify_token(token: &str, secret: &AppSecret) -> Result<TokenClaims, JwtError> {
    jwt::verify_hs256(token, secret.as_bytes())
}
