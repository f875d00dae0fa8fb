//! Router client.

mod builder;

pub use builder::ClientBuilder;

use crate::device::{DeviceRecord, RouterInformation};
use crate::error::{Error, Result};
use crate::mib::{self, ValuePolicy};
use crate::oid::Oid;
use crate::session::{Clock, DEFAULT_CREDENTIAL_TTL, Session, SystemClock};
use crate::transport::{HttpTransport, Response, Transport};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Span, instrument};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Times a request is resent after the router rejected the credential.
const AUTH_RETRIES: u32 = 1;

const GET_CONN_DEVICES: &str = "getConnDevices";
const SNMP_GET: &str = "snmpGet";

impl Client<HttpTransport> {
    /// Create a new client builder.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use arris_connectbox::Client;
    /// use std::time::Duration;
    ///
    /// # async fn example() -> arris_connectbox::Result<()> {
    /// let client = Client::builder("192.168.178.1", "password")
    ///     .timeout(Duration::from_secs(5))
    ///     .connect()?;
    ///
    /// for device in client.get_connected_devices().await? {
    ///     println!("{}", device);
    /// }
    /// client.logout().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(host: impl Into<String>, password: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(host, password)
    }
}

/// Client for the router's management API.
///
/// Generic over transport type, with `HttpTransport` as default, and over the
/// clock driving credential expiry. Cloning is cheap and clones share the
/// credential.
pub struct Client<T: Transport = HttpTransport, C: Clock = SystemClock> {
    inner: Arc<ClientInner<T, C>>,
}

impl<T: Transport, C: Clock> Clone for Client<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ClientInner<T: Transport, C: Clock> {
    session: Session<T, C>,
    config: ClientConfig,
}

/// Client configuration.
///
/// Most users should use [`ClientBuilder`] rather than constructing this directly.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Request timeout (default: 10 seconds)
    pub timeout: Duration,
    /// How long a login token is reused (default: 5 minutes)
    pub credential_ttl: Duration,
    /// Value sent as `_n` with every request (default: random)
    pub nonce: u32,
    /// How the decoder treats bad values (default: Strict)
    pub value_policy: ValuePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            credential_ttl: DEFAULT_CREDENTIAL_TTL,
            nonce: crate::session::random_nonce(),
            value_policy: ValuePolicy::Strict,
        }
    }
}

impl<T: Transport> Client<T, SystemClock> {
    /// Create a new client with the given transport and config.
    pub fn new(transport: T, password: impl Into<String>, config: ClientConfig) -> Self {
        Self::with_clock(transport, password, config, SystemClock)
    }
}

impl<T: Transport, C: Clock> Client<T, C> {
    /// Create a new client whose credential expiry follows `clock`.
    pub fn with_clock(
        transport: T,
        password: impl Into<String>,
        config: ClientConfig,
        clock: C,
    ) -> Self {
        let session = Session::with_clock(
            transport,
            password,
            config.nonce,
            config.credential_ttl,
            clock,
        );
        Self {
            inner: Arc::new(ClientInner { session, config }),
        }
    }

    /// Base URL requests go to.
    pub fn base_url(&self) -> &str {
        self.inner.session.transport().base_url()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Session owning this client's credential.
    pub fn session(&self) -> &Session<T, C> {
        &self.inner.session
    }

    /// Send an authenticated request.
    ///
    /// A `401` drops the credential and the request is sent once more with a
    /// fresh login. Any other non-2xx status is an error.
    #[instrument(
        level = "debug",
        skip(self, query),
        fields(
            connectbox.base_url = %self.base_url(),
            connectbox.attempt = tracing::field::Empty,
            connectbox.elapsed_ms = tracing::field::Empty,
        )
    )]
    async fn fetch(&self, endpoint: &'static str, query: &str) -> Result<Response> {
        let start = Instant::now();
        let mut last_error: Option<Box<Error>> = None;

        for attempt in 0..=AUTH_RETRIES {
            Span::current().record("connectbox.attempt", attempt);
            if attempt > 0 {
                tracing::debug!(target: "arris_connectbox::client", { endpoint }, "retrying with new credential");
            }

            let credential = self.inner.session.credential().await?;
            let request = crate::transport::Request::new(endpoint, query)
                .with_credential(credential.token());
            let response = self.inner.session.transport().get(request).await?;

            Span::current().record("connectbox.elapsed_ms", start.elapsed().as_millis() as u64);

            if response.is_success() {
                return Ok(response);
            }

            let error = Error::Http {
                endpoint: endpoint.into(),
                status: response.status,
            }
            .boxed();

            if response.status != 401 {
                return Err(error);
            }

            tracing::debug!(target: "arris_connectbox::client", { endpoint }, "credential rejected");
            self.inner.session.invalidate();
            last_error = Some(error);
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Http {
                endpoint: endpoint.into(),
                status: 401,
            }
            .boxed()
        }))
    }

    /// List every client row group the router knows about.
    ///
    /// Devices with both an IPv4 and an IPv6 address appear once per
    /// address. Offline devices are included.
    #[instrument(skip(self), err, fields(connectbox.base_url = %self.base_url()))]
    pub async fn get_connected_devices(&self) -> Result<Vec<DeviceRecord>> {
        let query = format!("_n={}", self.inner.config.nonce);
        let response = self.fetch(GET_CONN_DEVICES, &query).await?;

        let devices = mib::decode_devices_with(&response.text(), self.inner.config.value_policy)?;
        tracing::debug!(target: "arris_connectbox::client", { device_count = devices.len() }, "decoded connected devices");
        Ok(devices)
    }

    /// Online devices, one per MAC address in first-seen order.
    ///
    /// Records without a MAC address are skipped.
    pub async fn online_devices(&self) -> Result<Vec<DeviceRecord>> {
        let devices = self.get_connected_devices().await?;
        Ok(online_unique(devices))
    }

    /// Read the router's own identity.
    ///
    /// A body that begins with `Error` is the router refusing the request
    /// and surfaces as [`Error::ConnectBox`]. Any other non-JSON body is a
    /// malformed response.
    #[instrument(skip(self), err, fields(connectbox.base_url = %self.base_url()))]
    pub async fn get_router_information(&self) -> Result<RouterInformation> {
        let oids = [
            mib::router_mac_address(),
            mib::router_hardware_version(),
            mib::router_software_version(),
            mib::router_serial_number(),
        ];
        let response = self.fetch(SNMP_GET, &snmp_get_query(&oids, self.inner.config.nonce)).await?;
        let body = response.text();

        if body.starts_with("Error") {
            tracing::debug!(target: "arris_connectbox::client", { body = %body }, "router refused snmpGet");
            return Err(Error::ConnectBox {
                message: body.trim_end().into(),
            }
            .boxed());
        }

        let object = mib::parse_object(&body)?;
        let lookup = |oid: &Oid| -> Result<String> {
            object
                .get(&oid.to_string())
                .map(|value| mib::value_text(value).into_owned())
                .ok_or_else(|| {
                    Error::MalformedResponse {
                        reason: format!("snmpGet response has no value for {}", oid).into(),
                    }
                    .boxed()
                })
        };

        let [mac, hardware, software, serial] = &oids;
        Ok(RouterInformation {
            mac_address: mib::format_mac(&lookup(mac)?)?,
            hardware_version: lookup(hardware)?,
            software_version: lookup(software)?,
            serial_number: lookup(serial)?,
        })
    }

    /// End the router session and drop the credential.
    #[instrument(skip(self), err, fields(connectbox.base_url = %self.base_url()))]
    pub async fn logout(&self) -> Result<()> {
        self.inner.session.logout().await
    }
}

impl<T: Transport, C: Clock> std::fmt::Debug for Client<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url())
            .field("config", &self.inner.config)
            .finish()
    }
}

/// `oids=a;b;c;&_n=nonce`, with the separators left unescaped.
fn snmp_get_query(oids: &[Oid], nonce: u32) -> String {
    let mut query = String::from("oids=");
    for oid in oids {
        query.push_str(&oid.to_string());
        query.push(';');
    }
    query.push_str(&format!("&_n={}", nonce));
    query
}

fn online_unique(devices: Vec<DeviceRecord>) -> Vec<DeviceRecord> {
    let mut seen = HashSet::new();
    devices
        .into_iter()
        .filter(|device| device.online)
        .filter(|device| match &device.mac_address {
            Some(mac) => seen.insert(mac.clone()),
            None => false,
        })
        .collect()
}
