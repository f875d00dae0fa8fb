//! Single-slot credential cache with time-based expiry.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::clock::Clock;
use super::credential::Credential;

/// Holds at most one [`Credential`] and its expiry.
///
/// Reads, replacements and invalidation each take the one lock, so a reader
/// never observes a credential that a concurrent `invalidate` already
/// dropped. The lock is never held across I/O.
#[derive(Debug)]
pub struct CredentialCache<C: Clock> {
    slot: Mutex<Option<Credential>>,
    ttl: Duration,
    clock: C,
}

impl<C: Clock> CredentialCache<C> {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration, clock: C) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
            clock,
        }
    }

    /// Current instant according to the cache's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Validity window given to new credentials.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the cached credential if it has not expired.
    ///
    /// An expired credential is dropped from the cache.
    pub fn get(&self) -> Option<Credential> {
        let now = self.clock.now();
        let mut slot = self.slot.lock().ok()?;
        match slot.as_ref() {
            Some(credential) if !credential.is_expired_at(now) => Some(credential.clone()),
            Some(_) => {
                tracing::debug!(target: "arris_connectbox::session", "cached credential expired");
                *slot = None;
                None
            }
            None => None,
        }
    }

    /// Replace the cached credential. The last writer wins.
    pub fn store(&self, credential: Credential) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(credential);
        }
    }

    /// Drop the cached credential.
    ///
    /// Returns true if a credential was cached.
    pub fn invalidate(&self) -> bool {
        self.slot
            .lock()
            .map(|mut slot| slot.take().is_some())
            .unwrap_or(false)
    }

    /// Check if a credential is cached, expired or not.
    pub fn is_empty(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_none()).unwrap_or(true)
    }
}
