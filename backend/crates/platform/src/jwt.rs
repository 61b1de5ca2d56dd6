//! Compact HS256 Tokens
//!
//! Thin wrapper over `jsonwebtoken` fixed to HMAC-SHA256 with the standard
//! `{"alg":"HS256","typ":"JWT"}` header. Claims are any serde type, so the
//! payload carries exactly the fields the caller defines.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token signing failed: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("Token verification failed: {0}")]
    Verify(#[source] jsonwebtoken::errors::Error),
}

/// Sign `claims` with `key` as the raw HMAC key
pub fn sign_hs256<C: Serialize>(claims: &C, key: &[u8]) -> Result<String, JwtError> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(key),
    )
    .map_err(JwtError::Sign)
}

/// Verify signature and `exp`, then decode claims
///
/// Unknown claims are ignored by serde, so tokens carrying extra fields
/// still verify against a narrower claims type.
pub fn verify_hs256<C: DeserializeOwned>(token: &str, key: &[u8]) -> Result<C, JwtError> {
    let validation = Validation::new(Algorithm::HS256);

    jsonwebtoken::decode::<C>(token, &DecodingKey::from_secret(key), &validation)
        .map(|data| data.claims)
        .map_err(JwtError::Verify)
}
