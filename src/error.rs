//! Error types for arris-connectbox.
//!
//! This module provides:
//!
//! - [`Error`] - The main error type for every client operation
//! - [`ValueErrorKind`] - Why a single value in a router payload was rejected
//!
//! # Error Handling
//!
//! Errors are boxed for efficiency: `Result<T> = Result<T, Box<Error>>`.
//!
//! ```rust
//! use arris_connectbox::{Error, Result};
//!
//! fn handle_error(result: Result<()>) {
//!     match result {
//!         Ok(()) => println!("Success"),
//!         Err(e) => match &*e {
//!             Error::Http { endpoint, status } => {
//!                 println!("{} answered with HTTP {}", endpoint, status);
//!             }
//!             Error::InvalidCredential { .. } => {
//!                 println!("Login did not return a token");
//!             }
//!             _ => println!("Error: {}", e),
//!         }
//!     }
//! }
//! ```

/// Result type alias using the library's boxed Error type.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Reason a payload value was rejected by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// MAC value is not `$` followed by 12 hex digits.
    InvalidMacFormat,
    /// Date value is not `$` followed by at least 8 hex-encoded bytes.
    InvalidDateFormat,
    /// Row index does not encode a 4 or 16 byte IP address.
    InvalidAddress,
    /// Value expected to be a non-negative integer.
    InvalidInteger,
    /// Adapter type outside the known enumeration.
    UnknownAdapterType(u32),
    /// Client type outside the known enumeration.
    UnknownClientType(u32),
}

impl std::fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMacFormat => write!(f, "invalid MAC format"),
            Self::InvalidDateFormat => write!(f, "invalid date format"),
            Self::InvalidAddress => write!(f, "invalid IP address in row index"),
            Self::InvalidInteger => write!(f, "invalid integer"),
            Self::UnknownAdapterType(v) => write!(f, "unknown adapter type: {}", v),
            Self::UnknownClientType(v) => write!(f, "unknown client type: {}", v),
        }
    }
}

/// The main error type for all arris-connectbox operations.
///
/// # Common Patterns
///
/// ```
/// use arris_connectbox::Error;
///
/// fn is_auth_problem(error: &Error) -> bool {
///     matches!(error,
///         Error::Http { status: 401, .. } |
///         Error::InvalidCredential { .. }
///     )
/// }
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Router answered with a status that is not accepted for this endpoint.
    #[error("HTTP status {status} from {endpoint}")]
    Http { endpoint: Box<str>, status: u16 },

    /// Request failed before a response status was received.
    #[error("network error calling {endpoint}: {source}")]
    Network {
        endpoint: Box<str>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Login body could not be decoded into a token.
    #[error("invalid credential: {reason}")]
    InvalidCredential { reason: Box<str> },

    /// Router reported a protocol-level failure.
    #[error("connect box error: {message}")]
    ConnectBox { message: Box<str> },

    /// Response body did not have the expected shape.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: Box<str> },

    /// A value inside a router payload could not be decoded.
    #[error("{kind}: {value:?}")]
    InvalidValue { kind: ValueErrorKind, value: Box<str> },

    /// Invalid OID format.
    #[error("invalid OID: {0}")]
    InvalidOid(Box<str>),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(Box<str>),
}

impl Error {
    /// Box this error (convenience for constructing boxed errors).
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Create a value error for the given raw value.
    pub fn invalid_value(kind: ValueErrorKind, value: impl Into<Box<str>>) -> Box<Self> {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
        .boxed()
    }

    /// Whether this is a router-reported protocol failure.
    ///
    /// Credential failures are a special case of protocol failures.
    pub fn is_connect_box_error(&self) -> bool {
        matches!(self, Self::ConnectBox { .. } | Self::InvalidCredential { .. })
    }

    /// The value error kind, if this is a decode failure.
    pub fn value_kind(&self) -> Option<ValueErrorKind> {
        match self {
            Self::InvalidValue { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
