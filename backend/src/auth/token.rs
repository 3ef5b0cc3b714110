//! Signed session token issue and verification
//!
//! Tokens are compact JWTs carrying the user's email as subject. Keys are
//! derived once from the process-wide secret and cached, so the codec is a
//! pure function of (secret, input) and safe to share across requests.
//!
//! The clock is injected: both `issue` and `verify` take `now` from the
//! caller. Expiry is enforced here at verification time, not by the
//! underlying JWT library, so tests can probe the boundary exactly.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Why a token failed verification
///
/// Callers must treat all three identically for authorization decisions;
/// the distinction exists for internal logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Token codec with pre-computed signing keys
///
/// Key derivation happens once at startup; cloning is Arc increments.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    header: Header,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from the process-wide secret
    ///
    /// Call once at application startup and store in AppState.
    pub fn new(secret: &SecretString, algorithm: Algorithm, ttl_secs: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(algorithm);
        // Expiry is checked manually against the caller's clock
        validation.validate_exp = false;
        validation.required_spec_claims = Default::default();

        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret_bytes)),
            decoding: Arc::new(DecodingKey::from_secret(secret_bytes)),
            header: Header::new(algorithm),
            validation,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Configured token lifetime in seconds
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a signed token for `subject`, expiring at `now` + TTL
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String> {
        self.issue_with_ttl(subject, now, self.ttl)
    }

    /// Issue a signed token with an explicit lifetime
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&self.header, &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// Verify a token at time `now` and return its subject
    ///
    /// Signature is checked before expiry: a tampered-with token never
    /// reports `Expired`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidAlgorithmName
                    | ErrorKind::InvalidKeyFormat => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                }
            })?;

        let claims = token_data.claims;
        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }
}
