//! # arris-connectbox
//!
//! Async client for the web management API of the Arris TG2492LG router,
//! sold as the Ziggo Connect Box.
//!
//! ## Features
//!
//! - Lazy login with a cached, time-limited credential
//! - One transparent re-login when the router rejects the credential
//! - Decoding of the router's OID-keyed client table into [`DeviceRecord`]s
//! - Router identity (MAC, hardware and software version, serial number)
//! - Pluggable [`Transport`] with a reqwest implementation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arris_connectbox::Client;
//!
//! #[tokio::main]
//! async fn main() -> arris_connectbox::Result<()> {
//!     let client = Client::builder("192.168.178.1", "password").connect()?;
//!
//!     let info = client.get_router_information().await?;
//!     println!("router {} runs {}", info.mac_address, info.software_version);
//!
//!     for device in client.online_devices().await? {
//!         println!("{}", device);
//!     }
//!
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod device;
pub mod error;
pub mod mib;
pub mod oid;
pub mod session;
pub mod transport;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use client::{Client, ClientBuilder, ClientConfig};
pub use device::{AdapterType, ClientType, DeviceRecord, RouterInformation};
pub use error::{Error, Result, ValueErrorKind};
pub use mib::{ValuePolicy, decode_devices, decode_devices_with, format_date, format_mac};
pub use oid::Oid;
pub use session::{Clock, Credential, Session, SystemClock};
pub use transport::{HttpTransport, Request, Response, Transport};

/// Type alias for a client talking HTTP to a real router.
pub type HttpClient = Client<HttpTransport>;

/// Testing utilities exposed via the `testing` feature.
#[cfg(feature = "testing")]
pub mod testing {
    pub use crate::session::ManualClock;
    pub use crate::transport::{MockResponse, MockTransport};
}
