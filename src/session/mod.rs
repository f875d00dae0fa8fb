//! Login session management.
//!
//! The router hands out a bearer token from `/login` and expects it back as a
//! `credential` cookie. [`Session`] owns that token: it logs in lazily, keeps
//! the token for a fixed window, and drops it when the router rejects it or
//! on logout.

mod cache;
mod clock;
mod credential;

pub use cache::CredentialCache;
pub use clock::{Clock, SystemClock};
pub use credential::Credential;

#[cfg(any(test, feature = "testing"))]
pub use clock::ManualClock;

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::transport::{Request, Transport};

/// User name the management interface logs in as.
pub const USERNAME: &str = "admin";

/// Default credential lifetime.
pub const DEFAULT_CREDENTIAL_TTL: Duration = Duration::from_secs(5 * 60);

pub(crate) const LOGIN: &str = "login";
pub(crate) const LOGOUT: &str = "logout";

/// Pick a nonce in the range the web interface uses.
pub fn random_nonce() -> u32 {
    use rand::Rng;
    rand::thread_rng().gen_range(10_000..100_000)
}

/// Credential owner for one router.
pub struct Session<T: Transport, C: Clock = SystemClock> {
    transport: T,
    password: Zeroizing<String>,
    nonce: u32,
    cache: CredentialCache<C>,
}

impl<T: Transport> Session<T, SystemClock> {
    /// Create a session using the system clock.
    pub fn new(transport: T, password: impl Into<String>, nonce: u32, ttl: Duration) -> Self {
        Self::with_clock(transport, password, nonce, ttl, SystemClock)
    }
}

impl<T: Transport, C: Clock> Session<T, C> {
    /// Create a session with an explicit clock.
    pub fn with_clock(
        transport: T,
        password: impl Into<String>,
        nonce: u32,
        ttl: Duration,
        clock: C,
    ) -> Self {
        Self {
            transport,
            password: Zeroizing::new(password.into()),
            nonce,
            cache: CredentialCache::new(ttl, clock),
        }
    }

    /// Nonce sent as `_n` with every request.
    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Return the cached credential, logging in if none is valid.
    ///
    /// Concurrent callers that both miss the cache both log in. The last
    /// credential stored wins.
    pub async fn credential(&self) -> Result<Credential> {
        if let Some(credential) = self.cache.get() {
            return Ok(credential);
        }

        let credential = self.login().await?;
        self.cache.store(credential.clone());
        Ok(credential)
    }

    /// Log in and return a new credential.
    ///
    /// The result is not cached; [`credential`](Self::credential) does that.
    pub async fn login(&self) -> Result<Credential> {
        let request = Request::new(LOGIN, self.login_query());
        let response = self.transport.get(request).await?;

        if !response.is_success() {
            tracing::debug!(target: "arris_connectbox::session", { status = response.status }, "login rejected");
            return Err(Error::Http {
                endpoint: LOGIN.into(),
                status: response.status,
            }
            .boxed());
        }

        let credential =
            Credential::from_token(&response.text(), self.cache.now(), self.cache.ttl())?;
        tracing::debug!(target: "arris_connectbox::session", { user = credential.user() }, "logged in");
        Ok(credential)
    }

    /// End the router session.
    ///
    /// The router answers a successful logout with `500`, which is accepted
    /// alongside `2xx`. The cached credential is dropped whatever the
    /// outcome.
    pub async fn logout(&self) -> Result<()> {
        let result = self.send_logout().await;
        self.invalidate();
        result
    }

    async fn send_logout(&self) -> Result<()> {
        let credential = self.credential().await?;
        let request =
            Request::new(LOGOUT, format!("_n={}", self.nonce)).with_credential(credential.token());
        let response = self.transport.get(request).await?;

        if response.is_success() || response.status == 500 {
            tracing::debug!(target: "arris_connectbox::session", { status = response.status }, "logged out");
            Ok(())
        } else {
            Err(Error::Http {
                endpoint: LOGOUT.into(),
                status: response.status,
            }
            .boxed())
        }
    }

    /// Drop the cached credential so the next call logs in again.
    pub fn invalidate(&self) {
        if self.cache.invalidate() {
            tracing::debug!(target: "arris_connectbox::session", "credential invalidated");
        }
    }

    /// `arg` carries `admin:<password>` with the password percent-encoded,
    /// then base64. The base64 padding stays unescaped.
    fn login_query(&self) -> String {
        let plain = Zeroizing::new(format!(
            "{}:{}",
            USERNAME,
            urlencoding::encode(&self.password)
        ));
        format!("arg={}&_n={}", STANDARD.encode(plain.as_bytes()), self.nonce)
    }
}

impl<T: Transport, C: Clock> std::fmt::Debug for Session<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.transport.base_url())
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}
