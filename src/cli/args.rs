//! Command-line argument structures for the connectbox CLI tools.
//!
//! This module provides reusable clap argument structures for the
//! `connectbox-*` binaries.

use clap::{Parser, ValueEnum};
use std::time::Duration;

use crate::client::{Client, ClientBuilder};
use crate::error::Result;
use crate::mib::ValuePolicy;

/// Decoder policy for CLI argument parsing.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum DecodePolicy {
    /// Fail on the first undecodable value (default).
    #[default]
    Strict,
    /// Skip undecodable values.
    Lenient,
}

impl From<DecodePolicy> for ValuePolicy {
    fn from(policy: DecodePolicy) -> Self {
        match policy {
            DecodePolicy::Strict => ValuePolicy::Strict,
            DecodePolicy::Lenient => ValuePolicy::Lenient,
        }
    }
}

/// Router connection arguments shared across all CLI tools.
#[derive(Debug, Parser)]
pub struct RouterArgs {
    /// IP address or host name of the router.
    #[arg(long = "host", value_name = "HOST")]
    pub host: String,

    /// Password of the router's admin account.
    #[arg(long = "password", env = "CONNECTBOX_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Request timeout in seconds.
    #[arg(short = 't', long = "timeout", default_value = "10")]
    pub timeout: f64,

    /// How to treat device values that cannot be decoded.
    #[arg(long = "policy", default_value = "strict")]
    pub policy: DecodePolicy,
}

impl RouterArgs {
    /// Request timeout as a Duration.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs_f64(self.timeout.max(0.0))
    }

    /// Builder configured from these arguments.
    pub fn builder(&self) -> ClientBuilder {
        Client::builder(self.host.clone(), self.password.clone())
            .timeout(self.timeout_duration())
            .value_policy(self.policy.into())
    }

    /// Build an HTTP client from these arguments.
    pub fn connect(&self) -> Result<Client> {
        self.builder().connect()
    }
}

/// Logging arguments.
#[derive(Debug, Parser)]
pub struct LogArgs {
    /// Enable debug logging (arris_connectbox=debug).
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable trace logging (arris_connectbox=trace).
    #[arg(short = 'D', long = "trace")]
    pub trace: bool,
}

impl LogArgs {
    /// Filter directive selected by the flags.
    pub fn filter(&self) -> &'static str {
        if self.trace {
            "arris_connectbox=trace"
        } else if self.debug {
            "arris_connectbox=debug"
        } else {
            "arris_connectbox=warn"
        }
    }

    /// Initialize tracing based on debug/trace flags.
    ///
    /// Logs go to stderr so stdout stays clean for output.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(self.filter()))
            .with_writer(std::io::stderr)
            .try_init();
    }
}
