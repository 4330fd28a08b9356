//! Signed Token Primitives
//!
//! HS256 JWT signing and verification over arbitrary claim sets.
//! Callers own the claim struct; this module owns the algorithm choice
//! and the error classification.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Token signing/verification errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing key is empty
    #[error("Signing secret is empty")]
    EmptySecret,

    /// Claims could not be encoded or signed
    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Signature does not match the verifying secret
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// `exp` is in the past
    #[error("Token has expired")]
    Expired,

    /// Structurally broken token or unexpected claims
    #[error("Token is malformed: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),

    /// Signature is fine but a claim does not match what the verifier expects
    #[error("Token claim mismatch: {0}")]
    ClaimMismatch(&'static str),
}

/// Sign a claim set with an HMAC secret (HS256)
///
/// ## Examples
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Claims { sub: String, exp: u64 }
///
/// let exp = jsonwebtoken::get_current_timestamp() + 60;
/// let token = platform::token::sign(&Claims { sub: "alice".into(), exp }, b"secret").unwrap();
/// let claims: Claims = platform::token::verify(&token, b"secret").unwrap();
/// assert_eq!(claims.sub, "alice");
/// ```
pub fn sign<C: Serialize>(claims: &C, secret: &[u8]) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::EmptySecret);
    }

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(TokenError::Signing)
}

/// Verify an HS256 token and extract its claims
///
/// `exp` is required and checked with the library's default leeway.
pub fn verify<C: DeserializeOwned>(token: &str, secret: &[u8]) -> Result<C, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::EmptySecret);
    }

    let validation = Validation::new(Algorithm::HS256);

    jsonwebtoken::decode::<C>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        exp: u64,
    }

    fn claims(offset_secs: i64) -> TestClaims {
        let now = jsonwebtoken::get_current_timestamp();
        TestClaims {
            sub: "alice".to_string(),
            exp: now.saturating_add_signed(offset_secs),
        }
    }

    #[test]
    fn sign_and_verify() {
        let original = claims(3600);
        let token = sign(&original, b"secret-a").unwrap();
        let decoded: TestClaims = verify(&token, b"secret-a").unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn verify_wrong_secret_rejected() {
        let token = sign(&claims(3600), b"secret-a").unwrap();
        let result = verify::<TestClaims>(&token, b"secret-b");
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn verify_expired_token_rejected() {
        // Expired 2 minutes ago (past leeway).
        let token = sign(&claims(-120), b"secret-a").unwrap();
        let result = verify::<TestClaims>(&token, b"secret-a");
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn verify_garbage_rejected() {
        let result = verify::<TestClaims>("invalid.token.here", b"secret-a");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn empty_secret_rejected() {
        assert!(matches!(sign(&claims(60), b""), Err(TokenError::EmptySecret)));
        assert!(matches!(
            verify::<TestClaims>("a.b.c", b""),
            Err(TokenError::EmptySecret)
        ));
    }
}
