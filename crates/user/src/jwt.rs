//! Stateless session tokens
//!
//! Tokens are HS256 JWTs carrying `sub`, `iat` and `exp`. The signature
//! covers the whole claim set, so the expiry cannot be stripped or extended
//! without invalidating the token.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::UserResult;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username the token authenticates
    pub sub: String,
    /// Issued at (UTC timestamp, seconds)
    pub iat: u64,
    /// Expiration time (UTC timestamp, seconds)
    pub exp: u64,
}

/// Issues and verifies session tokens with a process-wide secret
///
/// Built once at startup and shared read-only between requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against our own clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Default lifetime applied by [`TokenService::issue`]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` valid for the configured TTL
    pub fn issue(&self, subject: &str) -> UserResult<String> {
        self.issue_at(subject, self.ttl, now())
    }

    /// Issue a token as if the current time were `now` (seconds since epoch)
    pub fn issue_at(&self, subject: &str, ttl: Duration, now: u64) -> UserResult<String> {
        let claims = Claims {
            sub: subject.to_owned(),
            iat: now,
            exp: now.saturating_add(ttl.as_secs()),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a token and return its subject
    ///
    /// Bad signatures, malformed tokens and expired tokens all yield `None`.
    pub fn verify(&self, token: &str) -> Option<String> {
        self.verify_at(token, now())
    }

    /// Verify a token as if the current time were `now` (seconds since epoch)
    pub fn verify_at(&self, token: &str, now: u64) -> Option<String> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).ok()?;

        if now >= data.claims.exp {
            return None;
        }

        Some(data.claims.sub)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
