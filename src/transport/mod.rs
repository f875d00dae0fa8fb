//! Transport layer abstraction.
//!
//! The router's management API is plain HTTP GET with hand-built query
//! strings and a `credential` cookie. [`Transport`] is the narrow seam the
//! client and session manager talk through; [`HttpTransport`] implements it
//! with reqwest.

mod http;

#[cfg(any(test, feature = "testing"))]
mod mock;

pub use http::*;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use crate::error::Result;
use bytes::Bytes;
use std::borrow::Cow;
use std::future::Future;

/// A GET request against one endpoint of the management API.
///
/// The query is sent exactly as given. The router expects characters such as
/// `;` and the base64 padding `=` unescaped, so callers build and encode it
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Endpoint name without leading slash (e.g. `"login"`).
    pub endpoint: &'static str,
    /// Raw query string without the leading `?`.
    pub query: String,
    /// Token sent as the `credential` cookie.
    pub credential: Option<String>,
}

impl Request {
    /// Create a request without a credential.
    pub fn new(endpoint: &'static str, query: impl Into<String>) -> Self {
        Self {
            endpoint,
            query: query.into(),
            credential: None,
        }
    }

    /// Attach a token as the `credential` cookie.
    pub fn with_credential(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(token.into());
        self
    }

    /// Path and query, e.g. `/login?arg=...&_n=12345`.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            format!("/{}", self.endpoint)
        } else {
            format!("/{}?{}", self.endpoint, self.query)
        }
    }
}

/// Status and body of a router response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Client-side transport abstraction.
///
/// # Clone Requirement
///
/// The session manager and client each hold a handle to the same transport.
/// Implementations use `Arc` internally, making clone cheap.
pub trait Transport: Send + Sync + Clone {
    /// Send a GET request and return the status and body.
    ///
    /// Any status is returned as `Ok`; only failures to obtain a response at
    /// all (connection refused, timeout) are errors.
    fn get(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;

    /// Base URL requests are sent to, for diagnostics.
    fn base_url(&self) -> &str;
}
