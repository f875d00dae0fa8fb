//! Client builder.
//!
//! This module provides the [`ClientBuilder`] type, the entry point for
//! constructing a [`Client`] against one router.

use std::time::Duration;

use crate::client::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::mib::ValuePolicy;
use crate::session::{Clock, DEFAULT_CREDENTIAL_TTL, SystemClock};
use crate::transport::{HttpTransport, Transport};

use super::Client;

/// Builder for constructing router clients.
///
/// # Example
///
/// ```rust,no_run
/// use arris_connectbox::{ClientBuilder, ValuePolicy};
/// use std::time::Duration;
///
/// # async fn example() -> arris_connectbox::Result<()> {
/// let client = ClientBuilder::new("192.168.178.1", "password")
///     .timeout(Duration::from_secs(5))
///     .credential_ttl(Duration::from_secs(120))
///     .value_policy(ValuePolicy::Lenient)
///     .connect()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    host: String,
    password: String,
    timeout: Duration,
    credential_ttl: Duration,
    nonce: Option<u32>,
    value_policy: ValuePolicy,
}

impl ClientBuilder {
    /// Create a new client builder.
    ///
    /// `host` is a bare host name or IP address, or a URL. Bare hosts are
    /// reached over `http://`.
    pub fn new(host: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
            credential_ttl: DEFAULT_CREDENTIAL_TTL,
            nonce: None,
            value_policy: ValuePolicy::Strict,
        }
    }

    /// Set the per-request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long a login token is reused before logging in again
    /// (default: 5 minutes).
    pub fn credential_ttl(mut self, ttl: Duration) -> Self {
        self.credential_ttl = ttl;
        self
    }

    /// Use a fixed `_n` value instead of a random one.
    pub fn nonce(mut self, nonce: u32) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Set how undecodable device values are handled (default: Strict).
    pub fn value_policy(mut self, policy: ValuePolicy) -> Self {
        self.value_policy = policy;
        self
    }

    /// Base URL derived from the host.
    pub fn base_url(&self) -> Result<String> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(Error::Config("host is empty".into()).boxed());
        }
        if host.contains(char::is_whitespace) {
            return Err(Error::Config(format!("invalid host {:?}", host).into()).boxed());
        }

        let url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else if host.contains("://") {
            return Err(Error::Config(format!("unsupported scheme in {:?}", host).into()).boxed());
        } else {
            format!("http://{}", host)
        };
        Ok(url.trim_end_matches('/').to_string())
    }

    fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be non-zero".into()).boxed());
        }
        if self.credential_ttl.is_zero() {
            return Err(Error::Config("credential TTL must be non-zero".into()).boxed());
        }
        Ok(())
    }

    fn build_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout,
            credential_ttl: self.credential_ttl,
            nonce: self.nonce.unwrap_or(defaults.nonce),
            value_policy: self.value_policy,
        }
    }

    /// Build a client over HTTP.
    pub fn connect(self) -> Result<Client<HttpTransport>> {
        self.validate()?;
        let transport = HttpTransport::new(&self.base_url()?, self.timeout)?;
        self.build_with(transport)
    }

    /// Build a client with a custom transport.
    ///
    /// The builder's host and timeout are not used; the transport already
    /// carries both.
    pub fn build_with<T: Transport>(self, transport: T) -> Result<Client<T>> {
        self.build_with_clock(transport, SystemClock)
    }

    /// Build a client with a custom transport and clock.
    pub fn build_with_clock<T: Transport, C: Clock>(
        self,
        transport: T,
        clock: C,
    ) -> Result<Client<T, C>> {
        self.validate()?;
        let config = self.build_config();
        tracing::debug!(target: "arris_connectbox::client", { base_url = transport.base_url(), nonce = config.nonce }, "building client");
        Ok(Client::with_clock(transport, self.password, config, clock))
    }
}
