//! Login token and its validity window.

use std::fmt;
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Claims the router encodes in its token.
#[derive(Deserialize)]
struct TokenClaims {
    name: String,
}

/// A login token presented as the `credential` cookie.
///
/// Credentials are immutable. Renewal replaces the cached credential with a
/// new one.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    user: String,
    created_at: Instant,
    expires_at: Instant,
}

impl Credential {
    /// Validate a login response body and wrap it as a credential.
    ///
    /// The router's token is base64 of a JSON object with a `name` field. An
    /// HTML error page or empty body means the login silently failed.
    pub fn from_token(token: &str, created_at: Instant, ttl: Duration) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidCredential {
            reason: reason.into(),
        };

        let token = token.trim();
        if token.is_empty() {
            return Err(invalid("empty login response".to_string()).boxed());
        }

        let decoded = STANDARD
            .decode(token)
            .map_err(|e| invalid(format!("token is not base64: {}", e)).boxed())?;
        let claims: TokenClaims = serde_json::from_slice(&decoded)
            .map_err(|e| invalid(format!("token is not a JSON claim set: {}", e)).boxed())?;

        Ok(Self {
            token: token.to_string(),
            user: claims.name,
            created_at,
            expires_at: created_at + ttl,
        })
    }

    /// The raw token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// User name the router issued the token for.
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Whether the credential is past its validity window at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
